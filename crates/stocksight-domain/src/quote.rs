//! Quote module - stock price snapshots

use serde::{Deserialize, Serialize};

/// A price snapshot for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    /// Ticker symbol
    pub symbol: String,

    /// Last traded price
    #[serde(rename = "price_last")]
    pub last: f64,

    /// Snapshot time, ISO-8601
    pub date: String,

    /// Percent change against the previous period
    pub change: Option<f64>,

    /// Period high
    #[serde(rename = "price_high")]
    pub high: f64,

    /// Period low
    #[serde(rename = "price_low")]
    pub low: f64,

    /// Period volume
    pub vol: Option<f64>,
}
