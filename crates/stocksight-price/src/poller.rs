//! Background poller writing price snapshots to the store

use crate::{ChartSource, PollerMetrics, PriceConfig, PriceError, RetryPolicy};
use chrono::Utc;
use stocksight_domain::traits::RecordStore;
use stocksight_domain::StockQuote;
use tokio::time::{sleep, timeout, Duration};

/// Date format written to quotes (UTC)
pub const QUOTE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Polls a chart source for one symbol and writes quotes to the store
///
/// Successful polls are spaced by the poll interval. Failed polls are
/// retried with a doubling delay, capped at `backoff_max_secs`.
///
/// # Examples
///
/// ```no_run
/// use stocksight_price::{PriceConfig, PriceFeed, PricePoller};
/// use stocksight_store::MemoryStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = PriceConfig::default();
///     let feed = PriceFeed::new(&config)?;
///     let mut poller = PricePoller::new(feed, MemoryStore::new(), "TSLA", config);
///
///     // Run indefinitely (until Ctrl+C)
///     poller.run().await?;
///     Ok(())
/// }
/// ```
pub struct PricePoller<C, St> {
    source: C,
    store: St,
    symbol: String,
    config: PriceConfig,
    retry: RetryPolicy,
    metrics: PollerMetrics,
}

impl<C, St> PricePoller<C, St>
where
    C: ChartSource,
    St: RecordStore,
{
    /// Create a poller for `symbol`
    pub fn new(source: C, store: St, symbol: impl Into<String>, config: PriceConfig) -> Self {
        let retry = RetryPolicy::new(config.backoff_base(), config.backoff_max());
        Self {
            source,
            store,
            symbol: symbol.into(),
            config,
            retry,
            metrics: PollerMetrics::new(),
        }
    }

    /// Symbol being polled
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Run until a shutdown signal (Ctrl+C) is received
    ///
    /// Fetch failures never stop the poller; they only delay the next poll.
    pub async fn run(&mut self) -> Result<PollerMetrics, PriceError> {
        tracing::info!(
            "Price poller started for {} (interval: {:?})",
            self.symbol,
            self.config.poll_interval()
        );

        loop {
            let result = self.poll_once().await;
            let delay = self.delay_after(&result);

            tokio::select! {
                _ = sleep(delay) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping price poller");
                    break;
                }
            }
        }

        tracing::info!("Price poller stopped. Final metrics:\n{}", self.metrics.summary());
        Ok(self.metrics.clone())
    }

    /// Poll `cycles` times back to back
    pub async fn run_cycles(&mut self, cycles: usize) -> Result<PollerMetrics, PriceError> {
        for cycle in 0..cycles {
            tracing::debug!("Starting poll {}/{}", cycle + 1, cycles);
            let result = self.poll_once().await;
            self.delay_after(&result);
        }

        tracing::info!("Price poller finished {} polls. Final metrics:\n{}", cycles, self.metrics.summary());
        Ok(self.metrics.clone())
    }

    /// Fetch one snapshot and write it when complete
    ///
    /// Returns the written quote, or `None` when the snapshot was incomplete
    /// or the store rejected it.
    ///
    /// # Errors
    ///
    /// Returns the fetch or decode error; the caller decides when to retry.
    pub async fn poll_once(&mut self) -> Result<Option<StockQuote>, PriceError> {
        self.metrics.polls += 1;
        tracing::info!("Grabbing stock data for symbol {}", self.symbol);

        let snapshot = match self.source.fetch_chart(&self.symbol).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.metrics.fetch_failures += 1;
                tracing::error!("Failed to get stock data for {}: {}", self.symbol, e);
                return Err(e);
            }
        };
        tracing::debug!("Chart snapshot for {}: {:?}", self.symbol, snapshot);

        let date = Utc::now().format(QUOTE_DATE_FORMAT).to_string();
        let Some(quote) = snapshot.into_quote(&self.symbol, date) else {
            self.metrics.incomplete += 1;
            tracing::warn!("Some stock data for {} had null values, skipping", self.symbol);
            return Ok(None);
        };

        match timeout(self.config.store_timeout(), self.store.index_quote(&quote)).await {
            Ok(Ok(())) => {
                self.metrics.quotes_written += 1;
                tracing::info!("Stored {} quote: last {} change {:?}", quote.symbol, quote.last, quote.change);
                Ok(Some(quote))
            }
            Ok(Err(e)) => {
                self.metrics.write_failures += 1;
                tracing::warn!("Failed to store {} quote: {}", quote.symbol, e);
                Ok(None)
            }
            Err(_) => {
                self.metrics.write_failures += 1;
                tracing::warn!("Timed out storing {} quote", quote.symbol);
                Ok(None)
            }
        }
    }

    /// Delay before the next poll given the last result
    ///
    /// A success resets the backoff and waits the poll interval; a failure
    /// waits the next backoff step.
    pub fn delay_after<T>(&mut self, result: &Result<T, PriceError>) -> Duration {
        match result {
            Ok(_) => {
                self.retry.reset();
                self.config.poll_interval()
            }
            Err(_) => {
                let delay = self.retry.next_delay();
                tracing::warn!("Retrying {} in {:?} (failure {})", self.symbol, delay, self.retry.failures());
                delay
            }
        }
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &PollerMetrics {
        &self.metrics
    }

    /// Reset the metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}
