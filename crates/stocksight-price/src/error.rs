//! Error types for price polling

use thiserror::Error;

/// Errors that can occur while fetching or decoding quotes
#[derive(Error, Debug)]
pub enum PriceError {
    /// Transport failure talking to the chart service
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Chart service answered with a non-success status
    #[error("Chart service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Request timed out
    #[error("Chart request timed out")]
    Timeout,

    /// Response did not match the chart schema
    #[error("Invalid chart response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for PriceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PriceError::Timeout
        } else {
            PriceError::Fetch(e.to_string())
        }
    }
}

impl From<serde_json::Error> for PriceError {
    fn from(e: serde_json::Error) -> Self {
        PriceError::InvalidResponse(e.to_string())
    }
}
