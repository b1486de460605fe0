//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! collaborators. Infrastructure implementations live in other crates.

use crate::{Label, NormalizedRecord, StockQuote};
use async_trait::async_trait;

/// Reading returned by a remote sentiment classifier
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteReading {
    /// Label mapped from the service's own vocabulary
    pub label: Label,

    /// Probability of negative sentiment
    pub negative: f64,

    /// Probability of positive sentiment
    pub positive: f64,

    /// Probability of neutral sentiment
    pub neutral: f64,
}

/// Trait for remote sentiment classification
///
/// Implemented by the infrastructure layer (stocksight-sentiment)
#[async_trait]
pub trait SentimentService: Send + Sync {
    /// Error type for classification calls
    type Error: std::fmt::Display + Send;

    /// Classify a piece of text
    async fn classify(&self, text: &str) -> Result<RemoteReading, Self::Error>;
}

/// Content extracted from a linked web page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    /// Full extracted plaintext
    pub text: String,

    /// Short natural-language summary
    pub summary: String,

    /// Keywords ranked by relevance
    pub keywords: Vec<String>,
}

/// Trait for fetching and summarizing linked pages
///
/// Implemented by the application layer (stocksight-extractor)
#[async_trait]
pub trait LinkContentSource: Send + Sync {
    /// Error type for fetch or extraction failures
    type Error: std::fmt::Display + Send;

    /// Fetch the page at `url` and extract its content
    async fn fetch(&self, url: &str) -> Result<PageContent, Self::Error>;
}

/// Trait for writing documents to the analytics store
///
/// Implemented by the infrastructure layer (stocksight-store)
#[async_trait]
pub trait RecordStore: Send {
    /// Error type for store operations
    type Error: std::fmt::Display + Send;

    /// Write a normalized post record
    async fn index_post(&mut self, record: &NormalizedRecord) -> Result<(), Self::Error>;

    /// Write a price snapshot
    async fn index_quote(&mut self, quote: &StockQuote) -> Result<(), Self::Error>;
}

/// Trait for the inbound post stream
///
/// Yields raw encoded payloads one at a time; `Ok(None)` marks the end of
/// the stream. Errors are fatal for the consumer.
#[async_trait]
pub trait PostSource: Send {
    /// Error type for transport failures
    type Error: std::fmt::Display + Send;

    /// Pull the next payload
    async fn next_payload(&mut self) -> Result<Option<String>, Self::Error>;
}
