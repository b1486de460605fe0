//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stocksight_extractor::LinkConfig;
use stocksight_gatekeeper::FilterPolicy;
use stocksight_pipeline::PipelineConfig;
use stocksight_price::PriceConfig;
use stocksight_sentiment::SentimentConfig;
use stocksight_store::StoreConfig;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "stocksight.toml";

/// Application configuration, one table per component.
///
/// ```toml
/// [filter]
/// required = ["amazon", "jeff bezos"]
/// ignored = ["giveaway"]
/// min_required = 1
///
/// [store]
/// backend = "sqlite"
/// sqlite_path = "posts.db"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Token filter policy
    pub filter: FilterPolicy,

    /// Sentiment scoring
    pub sentiment: SentimentConfig,

    /// Link following
    pub links: LinkConfig,

    /// Record store
    pub store: StoreConfig,

    /// Post pipeline
    pub pipeline: PipelineConfig,

    /// Price poller
    pub price: PriceConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `stocksight.toml` in the
    /// working directory is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(Path::new(DEFAULT_CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(contents)?;
        config.filter = config.filter.normalized();
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every component.
    pub fn validate(&self) -> Result<()> {
        self.filter.validate()?;
        self.sentiment.validate()?;
        self.links.validate()?;
        self.store.validate()?;
        self.pipeline.validate()?;
        self.price.validate()?;
        Ok(())
    }

    /// Apply `--override-tokens-*` flags; empty lists leave the policy as is.
    pub fn override_tokens(&mut self, required: &[String], ignored: &[String]) {
        if !required.is_empty() {
            self.filter = self.filter.clone().with_required(required.to_vec());
        }
        if !ignored.is_empty() {
            self.filter = self.filter.clone().with_ignored(ignored.to_vec());
        }
    }
}
