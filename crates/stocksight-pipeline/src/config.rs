//! Configuration for the post pipeline

use crate::PipelineError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the post pipeline
///
/// # Examples
///
/// ```
/// use stocksight_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert!(!config.follow_links);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Follow links embedded in posts and merge their sentiment
    pub follow_links: bool,

    /// Consult the remote sentiment classifier
    pub use_remote_sentiment: bool,

    /// Upper bound for one store write (seconds)
    pub store_timeout_secs: u64,

    /// Log the metrics summary every this many posts (0 disables)
    pub summary_every: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            use_remote_sentiment: false,
            store_timeout_secs: 10,
            summary_every: 1000,
        }
    }
}

impl PipelineConfig {
    /// Get the store write timeout as Duration
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.store_timeout_secs == 0 {
            return Err(PipelineError::Config(
                "store_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert!(!config.follow_links);
        assert!(!config.use_remote_sentiment);
        assert_eq!(config.store_timeout(), Duration::from_secs(10));
        assert_eq!(config.summary_every, 1000);
    }

    #[test]
    fn test_zero_timeout_invalid() {
        let config = PipelineConfig {
            store_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: PipelineConfig = toml::from_str("follow_links = true").unwrap();
        assert!(config.follow_links);
        assert_eq!(config.store_timeout_secs, 10);
    }
}
