//! Stocksight Domain Layer
//!
//! This crate contains the data model shared by every other layer of
//! Stocksight and the trait interfaces for its external collaborators.
//! It holds no I/O of its own.
//!
//! ## Key Concepts
//!
//! - **RawPost**: A social-media post as delivered by the inbound stream
//! - **TokenSet**: Normalized word units used for relevance filtering
//! - **SentimentVerdict**: Combined polarity, subjectivity and label
//! - **NormalizedRecord**: The document written to the analytics store
//! - **StockQuote**: A price snapshot written next to the post records
//!
//! ## Architecture
//!
//! - Pure data types and value objects
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod post;
pub mod quote;
pub mod record;
pub mod sentiment;
pub mod tokens;
pub mod traits;

// Re-exports for convenience
pub use post::{PostAuthor, RawPost};
pub use quote::StockQuote;
pub use record::NormalizedRecord;
pub use sentiment::{Label, SentimentVerdict};
pub use tokens::TokenSet;
pub use traits::{LinkContentSource, PageContent, PostSource, RecordStore, RemoteReading, SentimentService};
