//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur while building or loading a filter policy
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("Failed to parse policy TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to serialize policy TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
