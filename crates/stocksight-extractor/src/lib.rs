//! Stocksight Extractor
//!
//! Follows the links in a post, extracts the linked article and scores it.
//!
//! # Architecture
//!
//! ```text
//! URL → LinkContentSource → {text, summary, keywords} → FilterPolicy → SentimentScorer
//! ```
//!
//! # Key Features
//!
//! - **Article extraction**: readable text, ranked-sentence summary and keywords
//! - **Link gating**: permalink pages and off-topic pages yield no verdict
//! - **Verdict merging**: configurable merge strategy and label policy
//! - **Handle discovery**: `@handle` values from profile links on any page
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use stocksight_extractor::{ArticleFetcher, LinkConfig, LinkSentimentResolver};
//! use stocksight_gatekeeper::FilterPolicy;
//! use stocksight_sentiment::SentimentScorer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LinkConfig::default();
//! let fetcher = ArticleFetcher::new(&config)?;
//! let resolver = LinkSentimentResolver::new(fetcher, Arc::new(SentimentScorer::local()), config);
//!
//! let verdict = resolver
//!     .resolve("https://news.example/bezos", &FilterPolicy::default())
//!     .await;
//! println!("{:?}", verdict);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod article;
mod config;
mod error;
mod handles;
mod resolver;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use stocksight_domain::traits::{LinkContentSource, PageContent};

pub use article::{keywords, parse_article, split_sentences, summarize, Article, ArticleFetcher};
pub use config::{LinkConfig, LinkLabelPolicy, LinkMergeStrategy, DEFAULT_PERMALINK_MARKER};
pub use error::ExtractorError;
pub use handles::{handle_from_link, profile_handles, PROFILE_HOSTS};
pub use resolver::{merge_label, merge_verdicts, LinkSentimentResolver};

/// In-memory link source for deterministic testing
///
/// Unknown URLs fail with [`ExtractorError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct MockLinkSource {
    pages: Arc<Mutex<HashMap<String, Option<PageContent>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockLinkSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register page content for a URL
    pub fn add_page(&mut self, url: impl Into<String>, page: PageContent) {
        self.pages.lock().unwrap().insert(url.into(), Some(page));
    }

    /// Configure to return a fetch error for a URL
    pub fn add_error(&mut self, url: impl Into<String>) {
        self.pages.lock().unwrap().insert(url.into(), None);
    }

    /// Get the number of times fetch was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl LinkContentSource for MockLinkSource {
    type Error = ExtractorError;

    async fn fetch(&self, url: &str) -> Result<PageContent, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        match self.pages.lock().unwrap().get(url) {
            Some(Some(page)) => Ok(page.clone()),
            Some(None) => Err(ExtractorError::Fetch("Mock error".to_string())),
            None => Err(ExtractorError::NotFound(url.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_link_source() {
        let mut source = MockLinkSource::new();
        source.add_page(
            "https://a.example",
            PageContent {
                text: "body".into(),
                summary: "summary".into(),
                keywords: vec!["bezos".into()],
            },
        );
        source.add_error("https://b.example");

        assert_eq!(source.fetch("https://a.example").await.unwrap().summary, "summary");
        assert!(matches!(source.fetch("https://b.example").await, Err(ExtractorError::Fetch(_))));
        assert!(matches!(source.fetch("https://c.example").await, Err(ExtractorError::NotFound(_))));
        assert_eq!(source.call_count(), 3);
    }
}
