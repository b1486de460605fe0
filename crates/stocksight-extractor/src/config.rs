//! Configuration for link following

use crate::ExtractorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default marker identifying a social-platform permalink page
pub const DEFAULT_PERMALINK_MARKER: &str = "Tweet with a location";

/// How resolved link verdicts are merged into the post verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMergeStrategy {
    /// Accumulator starts at 0 and becomes `(acc + value) / 2` per link
    #[default]
    RunningPairwise,
    /// Accumulator is the arithmetic mean of the resolved links
    Mean,
}

/// How a resolved link label interacts with the post label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkLabelPolicy {
    /// A polar link label replaces a differing post label
    #[default]
    PreferPolar,
    /// The post's own label is kept
    KeepPost,
}

/// Configuration for the link sentiment resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Maximum time for a single page fetch (seconds)
    pub fetch_timeout_secs: u64,

    /// User agent sent with page requests
    pub user_agent: String,

    /// Pages whose text contains this marker are skipped
    pub permalink_marker: String,

    /// Number of sentences kept in a page summary
    pub summary_sentences: usize,

    /// Number of keywords extracted from a page
    pub max_keywords: usize,

    /// Multi-link merge strategy
    pub merge_strategy: LinkMergeStrategy,

    /// Link label handling
    pub label_policy: LinkLabelPolicy,
}

impl LinkConfig {
    /// Get the fetch timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.fetch_timeout_secs == 0 {
            return Err(ExtractorError::Config(
                "fetch_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.summary_sentences == 0 {
            return Err(ExtractorError::Config(
                "summary_sentences must be greater than 0".to_string(),
            ));
        }
        if self.max_keywords == 0 {
            return Err(ExtractorError::Config(
                "max_keywords must be greater than 0".to_string(),
            ));
        }
        if self.permalink_marker.trim().is_empty() {
            return Err(ExtractorError::Config(
                "permalink_marker cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 15,
            user_agent: concat!("stocksight/", env!("CARGO_PKG_VERSION")).to_string(),
            permalink_marker: DEFAULT_PERMALINK_MARKER.to_string(),
            summary_sentences: 5,
            max_keywords: 10,
            merge_strategy: LinkMergeStrategy::default(),
            label_policy: LinkLabelPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LinkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.merge_strategy, LinkMergeStrategy::RunningPairwise);
        assert_eq!(config.label_policy, LinkLabelPolicy::PreferPolar);
    }

    #[test]
    fn test_invalid_timeout() {
        let config = LinkConfig {
            fetch_timeout_secs: 0,
            ..LinkConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_marker_rejected() {
        let config = LinkConfig {
            permalink_marker: "  ".to_string(),
            ..LinkConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_strategy_names() {
        let config = LinkConfig::from_toml("merge_strategy = \"mean\"\nlabel_policy = \"keep_post\"").unwrap();
        assert_eq!(config.merge_strategy, LinkMergeStrategy::Mean);
        assert_eq!(config.label_policy, LinkLabelPolicy::KeepPost);
        assert_eq!(config.fetch_timeout_secs, 15);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LinkConfig::default();
        let parsed = LinkConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
