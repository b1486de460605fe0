//! Error types for pipeline operations

use thiserror::Error;

/// Errors that can occur while running the post pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Malformed upstream payload
    #[error("Malformed payload: {0}")]
    Decode(String),

    /// The inbound stream failed
    #[error("Stream source error: {0}")]
    Source(String),

    /// Reading the inbound stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::Decode(e.to_string())
    }
}
