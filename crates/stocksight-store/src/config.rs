use crate::elasticsearch::DEFAULT_URL;
use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Elasticsearch cluster over HTTP
    #[default]
    Elasticsearch,
    /// Local SQLite file
    Sqlite,
    /// Process memory, discarded at exit
    Memory,
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend to write to
    pub backend: StoreBackend,

    /// Elasticsearch base URL
    pub elasticsearch_url: String,

    /// Create the target index with its mapping at startup
    pub create_index: bool,

    /// SQLite database path
    pub sqlite_path: PathBuf,

    /// Upper bound for one write (seconds)
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            elasticsearch_url: DEFAULT_URL.to_string(),
            create_index: true,
            sqlite_path: PathBuf::from("stocksight.db"),
            timeout_secs: 10,
        }
    }
}

impl StoreConfig {
    /// Write timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.timeout_secs == 0 {
            return Err(StoreError::Config("timeout_secs must be > 0".to_string()));
        }
        match self.backend {
            StoreBackend::Elasticsearch
                if !(self.elasticsearch_url.starts_with("http://") || self.elasticsearch_url.starts_with("https://")) =>
            {
                Err(StoreError::Config(format!(
                    "elasticsearch_url must be an http(s) URL, got '{}'",
                    self.elasticsearch_url
                )))
            }
            StoreBackend::Sqlite if self.sqlite_path.as_os_str().is_empty() => {
                Err(StoreError::Config("sqlite_path cannot be empty".to_string()))
            }
            _ => Ok(()),
        }
    }
}
