//! Configuration for the price poller
//!
//! Defines the chart endpoint, poll cadence and retry backoff.

use crate::PriceError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder replaced by the ticker symbol in [`PriceConfig::chart_url`]
pub const SYMBOL_PLACEHOLDER: &str = "SYMBOL";

/// Default chart endpoint (2-minute bars over 5 days)
pub const DEFAULT_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart/SYMBOL?region=US&lang=en-US&includePrePost=false&interval=2m&range=5d&corsDomain=finance.yahoo.com&.tsrc=finance";

/// Configuration for the price poller
///
/// # Examples
///
/// ```
/// use stocksight_price::PriceConfig;
///
/// let config = PriceConfig::default();
/// assert_eq!(config.poll_interval_secs, 60);
/// assert!(config.url_for("TSLA").contains("/chart/TSLA?"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    /// Chart URL template containing `SYMBOL`
    pub chart_url: String,

    /// Delay between successful polls (seconds)
    pub poll_interval_secs: u64,

    /// First retry delay after a failed poll (seconds)
    pub backoff_base_secs: u64,

    /// Upper bound for the retry delay (seconds)
    pub backoff_max_secs: u64,

    /// Upper bound for one chart request (seconds)
    pub timeout_secs: u64,

    /// Upper bound for one store write (seconds)
    pub store_timeout_secs: u64,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            chart_url: DEFAULT_CHART_URL.to_string(),
            poll_interval_secs: 60,
            backoff_base_secs: 2,
            backoff_max_secs: 300,
            timeout_secs: 10,
            store_timeout_secs: 10,
        }
    }
}

impl PriceConfig {
    /// Chart URL for one symbol
    pub fn url_for(&self, symbol: &str) -> String {
        self.chart_url.replace(SYMBOL_PLACEHOLDER, symbol)
    }

    /// Get the poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Get the first retry delay as Duration
    pub fn backoff_base(&self) -> Duration {
        Duration::from_secs(self.backoff_base_secs)
    }

    /// Get the retry delay cap as Duration
    pub fn backoff_max(&self) -> Duration {
        Duration::from_secs(self.backoff_max_secs)
    }

    /// Get the request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the store write timeout as Duration
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PriceError> {
        if !self.chart_url.contains(SYMBOL_PLACEHOLDER) {
            return Err(PriceError::Config(format!(
                "chart_url must contain the {} placeholder",
                SYMBOL_PLACEHOLDER
            )));
        }
        if self.backoff_base_secs == 0 {
            return Err(PriceError::Config("backoff_base_secs must be greater than 0".to_string()));
        }
        if self.backoff_max_secs < self.backoff_base_secs {
            return Err(PriceError::Config(
                "backoff_max_secs must be at least backoff_base_secs".to_string(),
            ));
        }
        if self.timeout_secs == 0 || self.store_timeout_secs == 0 {
            return Err(PriceError::Config("timeouts must be greater than 0".to_string()));
        }
        Ok(())
    }
}
