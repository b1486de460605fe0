use crate::remote::{DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::{RemoteClassifier, SentimentError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sentiment scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Remote classifier endpoint; `None` disables the remote signal
    pub remote_url: Option<String>,

    /// Upper bound for one remote classification, in seconds
    pub timeout_secs: u64,

    /// Attempts per remote classification
    pub max_retries: u32,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            remote_url: Some(DEFAULT_ENDPOINT.to_string()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl SentimentConfig {
    /// Configuration without the remote classifier
    pub fn local_only() -> Self {
        Self {
            remote_url: None,
            ..Self::default()
        }
    }

    /// Remote call timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SentimentError> {
        if self.timeout_secs == 0 {
            return Err(SentimentError::Config("timeout_secs must be > 0".to_string()));
        }
        if self.max_retries == 0 {
            return Err(SentimentError::Config("max_retries must be > 0".to_string()));
        }
        if let Some(url) = &self.remote_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SentimentError::Config(format!(
                    "remote_url must be an http(s) URL, got '{}'",
                    url
                )));
            }
        }
        Ok(())
    }

    /// Build the remote classifier, if one is configured
    pub fn build_remote(&self) -> Result<Option<RemoteClassifier>, SentimentError> {
        self.validate()?;
        self.remote_url
            .as_deref()
            .map(|url| RemoteClassifier::new(url, self.timeout()).map(|c| c.with_max_retries(self.max_retries)))
            .transpose()
    }
}
