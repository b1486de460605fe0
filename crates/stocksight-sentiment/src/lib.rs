//! Stocksight Sentiment Layer
//!
//! Scores short texts by combining independent sentiment signals.
//!
//! # Signals
//!
//! - `RuleBasedAnalyzer`: lexicon and rule based compound score
//! - `PolarityEstimator`: opinion-word polarity and subjectivity
//! - `RemoteClassifier`: hosted classifier, consulted on demand
//! - `MockClassifier`: deterministic remote double for testing
//!
//! # Examples
//!
//! ```
//! use stocksight_sentiment::{combine, PolarityEstimate};
//! use stocksight_domain::Label;
//!
//! let verdict = combine(0.6, PolarityEstimate::new(0.4, 0.5), None);
//! assert_eq!(verdict.label, Label::Positive);
//! ```

#![warn(missing_docs)]

mod config;
pub mod estimator;
pub mod remote;
pub mod rules;
mod scorer;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use stocksight_domain::traits::{RemoteReading, SentimentService};
use stocksight_domain::Label;
use thiserror::Error;

pub use config::SentimentConfig;
pub use estimator::{PolarityEstimate, PolarityEstimator};
pub use remote::RemoteClassifier;
pub use rules::{RuleBasedAnalyzer, RuleScores};
pub use scorer::{combine, compound_label, estimate_label, SentimentScorer, DEFAULT_REMOTE_TIMEOUT};

/// Errors that can occur during sentiment operations
#[derive(Error, Debug)]
pub enum SentimentError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Non-success HTTP status from the classifier
    #[error("Classifier returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The request did not complete in time
    #[error("Classifier request timed out")]
    Timeout,

    /// Response body did not match the expected schema
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SentimentError {
    fn from(e: serde_json::Error) -> Self {
        SentimentError::InvalidResponse(e.to_string())
    }
}

/// Mock remote classifier for deterministic testing
///
/// Returns pre-configured labels without making any network calls.
///
/// # Examples
///
/// ```
/// use stocksight_sentiment::MockClassifier;
/// use stocksight_domain::Label;
///
/// let mut classifier = MockClassifier::new(Label::Neutral);
/// classifier.add_response("to the moon", Label::Positive);
/// assert_eq!(classifier.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockClassifier {
    default_label: Label,
    responses: Arc<Mutex<HashMap<String, Option<Label>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockClassifier {
    /// Create a new MockClassifier answering `label` for every text
    pub fn new(label: Label) -> Self {
        Self {
            default_label: label,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific label for a given text
    pub fn add_response(&mut self, text: impl Into<String>, label: Label) {
        self.responses.lock().unwrap().insert(text.into(), Some(label));
    }

    /// Configure to return an error for a specific text
    pub fn add_error(&mut self, text: impl Into<String>) {
        self.responses.lock().unwrap().insert(text.into(), None);
    }

    /// Get the number of times classify was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new(Label::Neutral)
    }
}

#[async_trait]
impl SentimentService for MockClassifier {
    type Error = SentimentError;

    async fn classify(&self, text: &str) -> Result<RemoteReading, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let label = match self.responses.lock().unwrap().get(text) {
            Some(Some(label)) => *label,
            Some(None) => return Err(SentimentError::Communication("Mock error".to_string())),
            None => self.default_label,
        };

        let (negative, positive, neutral) = match label {
            Label::Negative => (1.0, 0.0, 0.0),
            Label::Positive => (0.0, 1.0, 0.0),
            Label::Neutral => (0.0, 0.0, 1.0),
        };
        Ok(RemoteReading {
            label,
            negative,
            positive,
            neutral,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_classifier_default() {
        let classifier = MockClassifier::new(Label::Positive);
        let reading = classifier.classify("anything").await.unwrap();
        assert_eq!(reading.label, Label::Positive);
        assert_eq!(reading.positive, 1.0);
    }

    #[tokio::test]
    async fn test_mock_classifier_specific_responses() {
        let mut classifier = MockClassifier::default();
        classifier.add_response("sell everything", Label::Negative);

        assert_eq!(classifier.classify("sell everything").await.unwrap().label, Label::Negative);
        assert_eq!(classifier.classify("unknown").await.unwrap().label, Label::Neutral);
    }

    #[tokio::test]
    async fn test_mock_classifier_call_count() {
        let classifier = MockClassifier::default();
        assert_eq!(classifier.call_count(), 0);

        classifier.classify("one").await.unwrap();
        classifier.classify("two").await.unwrap();
        assert_eq!(classifier.call_count(), 2);

        classifier.reset_call_count();
        assert_eq!(classifier.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_classifier_error() {
        let mut classifier = MockClassifier::default();
        classifier.add_error("broken");

        let result = classifier.classify("broken").await;
        assert!(matches!(result, Err(SentimentError::Communication(_))));
    }

    #[test]
    fn test_json_error_maps_to_invalid_response() {
        let err: SentimentError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, SentimentError::InvalidResponse(_)));
    }
}
