//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Filter policy error
    #[error(transparent)]
    Policy(#[from] stocksight_gatekeeper::GatekeeperError),

    /// Sentiment setup error
    #[error(transparent)]
    Sentiment(#[from] stocksight_sentiment::SentimentError),

    /// Link fetching error
    #[error(transparent)]
    Extractor(#[from] stocksight_extractor::ExtractorError),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] stocksight_store::StoreError),

    /// Stream pipeline error
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] stocksight_pipeline::PipelineError),

    /// Price polling error
    #[error("Price error: {0}")]
    Price(#[from] stocksight_price::PriceError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Handle discovery found nothing to follow
    #[error("No author handles found at {0}")]
    NoHandles(String),
}
