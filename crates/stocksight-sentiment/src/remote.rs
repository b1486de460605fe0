//! Remote Sentiment Classifier
//!
//! Integrates a hosted sentiment API that accepts form-encoded text and
//! answers with class probabilities and a label.
//!
//! # Features
//!
//! - Async HTTP communication
//! - Configurable endpoint and timeout
//! - Retry with exponential backoff on transport failures
//! - Typed response decoding
//!
//! # Examples
//!
//! ```no_run
//! use stocksight_sentiment::RemoteClassifier;
//! use std::time::Duration;
//!
//! let classifier = RemoteClassifier::new(
//!     "http://text-processing.com/api/sentiment/",
//!     Duration::from_secs(10),
//! ).unwrap();
//! ```

use crate::SentimentError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use stocksight_domain::traits::{RemoteReading, SentimentService};
use stocksight_domain::Label;
use tracing::debug;

/// Default sentiment API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://text-processing.com/api/sentiment/";

/// Default timeout for classification requests (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of attempts (no retry)
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Remote sentiment classifier
pub struct RemoteClassifier {
    endpoint: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Response from the sentiment API
#[derive(Debug, Deserialize)]
struct SentimentResponse {
    #[serde(alias = "probabilities")]
    probability: Probabilities,
    label: String,
}

#[derive(Debug, Deserialize)]
struct Probabilities {
    neg: f64,
    pos: f64,
    neutral: f64,
}

impl RemoteClassifier {
    /// Create a new classifier
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API endpoint accepting a `text` form field
    /// - `timeout`: Upper bound for a single request
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SentimentError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a classifier for the default endpoint
    pub fn default_endpoint() -> Result<Self, SentimentError> {
        Self::new(DEFAULT_ENDPOINT, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Classify text
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The service is unreachable or times out
    /// - The service answers with a non-success status
    /// - The response body does not match the expected schema
    pub async fn classify_text(&self, text: &str) -> Result<RemoteReading, SentimentError> {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&self.endpoint).form(&[("text", text)]).send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!("Sentiment service answered {}", status);
                    if !status.is_success() {
                        let body = response.text().await.unwrap_or_default();
                        return Err(SentimentError::Status {
                            status: status.as_u16(),
                            body,
                        });
                    }
                    let body = response
                        .text()
                        .await
                        .map_err(|e| SentimentError::Communication(format!("Failed to read body: {}", e)))?;
                    return parse_response(&body);
                }
                Err(e) if e.is_timeout() => {
                    last_error = Some(SentimentError::Timeout);
                }
                Err(e) => {
                    last_error = Some(SentimentError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| SentimentError::Communication("Max retries exceeded".to_string())))
    }
}

#[async_trait]
impl SentimentService for RemoteClassifier {
    type Error = SentimentError;

    async fn classify(&self, text: &str) -> Result<RemoteReading, Self::Error> {
        self.classify_text(text).await
    }
}

/// Map the service's label vocabulary onto [`Label`]
///
/// `neg` and `neutral` map directly; anything else is positive.
pub fn map_label(label: &str) -> Label {
    match label {
        "neg" => Label::Negative,
        "neutral" => Label::Neutral,
        _ => Label::Positive,
    }
}

fn parse_response(body: &str) -> Result<RemoteReading, SentimentError> {
    let response: SentimentResponse = serde_json::from_str(body)?;
    Ok(RemoteReading {
        label: map_label(&response.label),
        negative: response.probability.neg,
        positive: response.probability.pos,
        neutral: response.probability.neutral,
    })
}
