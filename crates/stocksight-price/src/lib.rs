//! Stocksight Price
//!
//! Periodic stock-price snapshots written next to the scored posts.
//!
//! # Overview
//!
//! The poller is responsible for:
//! - **Fetching**: GET a chart URL templated with the ticker symbol
//! - **Decoding**: reading the latest close, high, low and volume, falling
//!   back one period when the newest value is still `null`
//! - **Writing**: storing a [`StockQuote`](stocksight_domain::StockQuote)
//!   when last, high and low are all known
//! - **Retrying**: doubling the delay after each failed poll, up to a cap,
//!   and resetting it after a success
//!
//! # Usage
//!
//! ```no_run
//! use stocksight_price::{PriceConfig, PriceFeed, PricePoller};
//! use stocksight_store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PriceConfig::default();
//!     let feed = PriceFeed::new(&config)?;
//!     let mut poller = PricePoller::new(feed, MemoryStore::new(), "AMZN", config);
//!     poller.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [price]
//! chart_url = "https://query1.finance.yahoo.com/v8/finance/chart/SYMBOL?interval=2m&range=5d"
//! poll_interval_secs = 60
//! backoff_base_secs = 2
//! backoff_max_secs = 300
//! timeout_secs = 10
//! store_timeout_secs = 10
//! ```

#![warn(missing_docs)]

mod chart;
mod config;
mod error;
mod feed;
mod metrics;
mod poller;
mod retry;

pub use chart::{decode_chart, latest, percent_change, ChartSnapshot};
pub use config::{PriceConfig, DEFAULT_CHART_URL, SYMBOL_PLACEHOLDER};
pub use error::PriceError;
pub use feed::{ChartSource, PriceFeed};
pub use metrics::PollerMetrics;
pub use poller::{PricePoller, QUOTE_DATE_FORMAT};
pub use retry::RetryPolicy;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock chart source for testing
///
/// Replays queued snapshots and errors in order; an empty queue answers
/// with a fetch error.
#[derive(Clone, Default)]
pub struct MockChartSource {
    responses: Arc<Mutex<VecDeque<Option<ChartSnapshot>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockChartSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a snapshot
    pub fn push_snapshot(&mut self, snapshot: ChartSnapshot) {
        self.responses.lock().unwrap().push_back(Some(snapshot));
    }

    /// Queue a fetch error
    pub fn push_error(&mut self) {
        self.responses.lock().unwrap().push_back(None);
    }

    /// Get the number of times fetch was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl ChartSource for MockChartSource {
    async fn fetch_chart(&self, _symbol: &str) -> Result<ChartSnapshot, PriceError> {
        *self.call_count.lock().unwrap() += 1;

        match self.responses.lock().unwrap().pop_front() {
            Some(Some(snapshot)) => Ok(snapshot),
            Some(None) => Err(PriceError::Fetch("Mock error".to_string())),
            None => Err(PriceError::Fetch("No response queued".to_string())),
        }
    }
}
