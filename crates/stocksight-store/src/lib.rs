//! Stocksight Storage Layer
//!
//! Implements the `RecordStore` trait for the analytics index and two local
//! alternatives.
//!
//! # Backends
//!
//! - `ElasticsearchStore`: one JSON document per record via `POST /{index}/_doc`
//! - `SqliteStore`: local tables for posts and quotes
//! - `MemoryStore`: shared in-process vectors for testing
//!
//! # Examples
//!
//! ```no_run
//! use stocksight_store::{ConfiguredStore, DocumentKind, StoreConfig};
//!
//! # async fn example() -> Result<(), stocksight_store::StoreError> {
//! let store = ConfiguredStore::open(&StoreConfig::default(), "stock-tweet", DocumentKind::Posts).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod elasticsearch;
mod memory;
mod sqlite;

use async_trait::async_trait;
use stocksight_domain::traits::RecordStore;
use stocksight_domain::{NormalizedRecord, StockQuote};
use thiserror::Error;
use tracing::info;

pub use config::{StoreBackend, StoreConfig};
pub use elasticsearch::{
    post_mapping, quote_mapping, ElasticsearchStore, DEFAULT_POST_INDEX, DEFAULT_QUOTE_INDEX, DEFAULT_URL,
};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("Store rejected the request with status {status}: {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The store is not accepting writes
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Which document shape an index holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Normalized post records
    Posts,
    /// Price snapshots
    Quotes,
}

/// A store selected by [`StoreConfig`]
pub enum ConfiguredStore {
    /// Elasticsearch backend
    Elasticsearch(ElasticsearchStore),
    /// SQLite backend
    Sqlite(SqliteStore),
    /// In-memory backend
    Memory(MemoryStore),
}

impl ConfiguredStore {
    /// Open the configured backend for `index`
    ///
    /// For Elasticsearch the index is created with the mapping of `kind`
    /// when `create_index` is set.
    pub async fn open(config: &StoreConfig, index: &str, kind: DocumentKind) -> Result<Self, StoreError> {
        config.validate()?;
        match config.backend {
            StoreBackend::Elasticsearch => {
                let store = ElasticsearchStore::new(&config.elasticsearch_url, index, config.timeout())?;
                if config.create_index {
                    let mapping = match kind {
                        DocumentKind::Posts => post_mapping(),
                        DocumentKind::Quotes => quote_mapping(),
                    };
                    store.ensure_index(&mapping).await?;
                }
                info!("Writing to Elasticsearch index {} at {}", index, config.elasticsearch_url);
                Ok(ConfiguredStore::Elasticsearch(store))
            }
            StoreBackend::Sqlite => {
                info!("Writing to SQLite database {}", config.sqlite_path.display());
                Ok(ConfiguredStore::Sqlite(SqliteStore::new(&config.sqlite_path)?))
            }
            StoreBackend::Memory => Ok(ConfiguredStore::Memory(MemoryStore::new())),
        }
    }
}

#[async_trait]
impl RecordStore for ConfiguredStore {
    type Error = StoreError;

    async fn index_post(&mut self, record: &NormalizedRecord) -> Result<(), Self::Error> {
        match self {
            ConfiguredStore::Elasticsearch(store) => store.index_post(record).await,
            ConfiguredStore::Sqlite(store) => store.index_post(record).await,
            ConfiguredStore::Memory(store) => store.index_post(record).await,
        }
    }

    async fn index_quote(&mut self, quote: &StockQuote) -> Result<(), Self::Error> {
        match self {
            ConfiguredStore::Elasticsearch(store) => store.index_quote(quote).await,
            ConfiguredStore::Sqlite(store) => store.index_quote(quote).await,
            ConfiguredStore::Memory(store) => store.index_quote(quote).await,
        }
    }
}
