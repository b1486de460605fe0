//! HTTP chart feed

use crate::chart::{decode_chart, ChartSnapshot};
use crate::{PriceConfig, PriceError};
use async_trait::async_trait;
use tracing::debug;

/// Source of chart snapshots for a symbol
#[async_trait]
pub trait ChartSource: Send + Sync {
    /// Fetch the latest snapshot for `symbol`
    async fn fetch_chart(&self, symbol: &str) -> Result<ChartSnapshot, PriceError>;
}

/// Chart source backed by an HTTP chart endpoint
///
/// # Examples
///
/// ```no_run
/// use stocksight_price::{ChartSource, PriceConfig, PriceFeed};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let feed = PriceFeed::new(&PriceConfig::default())?;
/// let snapshot = feed.fetch_chart("TSLA").await?;
/// println!("last: {:?}", snapshot.last);
/// # Ok(())
/// # }
/// ```
pub struct PriceFeed {
    client: reqwest::Client,
    config: PriceConfig,
}

impl PriceFeed {
    /// Create a feed from configuration
    pub fn new(config: &PriceConfig) -> Result<Self, PriceError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PriceError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Chart URL for a symbol
    pub fn url_for(&self, symbol: &str) -> String {
        self.config.url_for(symbol)
    }
}

#[async_trait]
impl ChartSource for PriceFeed {
    async fn fetch_chart(&self, symbol: &str) -> Result<ChartSnapshot, PriceError> {
        let url = self.url_for(symbol);
        debug!("Fetching chart for {} from {}", symbol, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PriceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        decode_chart(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_url() {
        let config = PriceConfig {
            chart_url: "http://localhost:9200/chart/SYMBOL".to_string(),
            ..Default::default()
        };
        let feed = PriceFeed::new(&config).unwrap();
        assert_eq!(feed.url_for("AMZN"), "http://localhost:9200/chart/AMZN");
    }

    #[test]
    fn test_feed_rejects_invalid_config() {
        let config = PriceConfig {
            chart_url: "http://localhost/chart".to_string(),
            ..Default::default()
        };
        assert!(matches!(PriceFeed::new(&config), Err(PriceError::Config(_))));
    }
}
