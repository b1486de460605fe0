//! Error types for link content extraction

use thiserror::Error;

/// Errors that can occur while fetching or extracting a linked page
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Network or transport failure
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Non-success HTTP status
    #[error("Page {url} returned status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Page fetch timeout
    #[error("Page fetch timeout")]
    Timeout,

    /// The URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No page registered for the URL (test source)
    #[error("No content for {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl From<reqwest::Error> for ExtractorError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ExtractorError::Timeout
        } else {
            ExtractorError::Fetch(e.to_string())
        }
    }
}

impl From<url::ParseError> for ExtractorError {
    fn from(e: url::ParseError) -> Self {
        ExtractorError::InvalidUrl(e.to_string())
    }
}
