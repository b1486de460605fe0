//! Stocksight Pipeline
//!
//! Turns a stream of raw post payloads into scored, normalized records.
//!
//! # Overview
//!
//! Each post moves through a fixed sequence of states:
//!
//! ```text
//! RECEIVED → clean → tokenize → policy → score → (follow links) → record → store
//!               ↓         ↓         ↓
//!          TextEmpty  TokensEmpty  Policy        (terminal, nothing written)
//! ```
//!
//! Rejections are terminal and side-effect free. A failed store write is
//! reported as [`PostOutcome::WriteFailed`] and never stops the stream.
//!
//! # Usage
//!
//! ## Single Post
//!
//! ```
//! use std::sync::Arc;
//! use stocksight_domain::RawPost;
//! use stocksight_gatekeeper::FilterPolicy;
//! use stocksight_pipeline::{ContentRejection, PipelineConfig, PostOutcome, PostPipeline};
//! use stocksight_sentiment::SentimentScorer;
//! use stocksight_store::MemoryStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut pipeline = PostPipeline::new(MemoryStore::new(), Arc::new(SentimentScorer::local()), PipelineConfig::default());
//! let post = RawPost::new(1, "   ", "2018-10-10T20:19:24");
//!
//! let outcome = pipeline.process(&post, &FilterPolicy::default()).await;
//! assert_eq!(outcome, PostOutcome::Rejected(ContentRejection::TextEmpty));
//! # }
//! ```
//!
//! ## Stream Worker
//!
//! See [`StreamWorker`]: it pulls payloads from a [`JsonLinesSource`] (or any
//! `PostSource`) until end of stream or Ctrl+C.
//!
//! # Configuration
//!
//! ```toml
//! [pipeline]
//! follow_links = false
//! use_remote_sentiment = false
//! store_timeout_secs = 10
//! summary_every = 1000
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod payload;
mod pipeline;
mod source;
mod worker;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use metrics::PipelineMetrics;
pub use payload::{decode_post, parse_created_at, title_case, RECORD_DATE_FORMAT, STREAM_DATE_FORMAT};
pub use pipeline::{ContentRejection, PostOutcome, PostPipeline};
pub use source::JsonLinesSource;
pub use worker::StreamWorker;
