//! Stocksight CLI library.
//!
//! Argument parsing, configuration loading, logging setup and the `tweets`
//! and `price` commands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use error::{CliError, Result};
pub use output::Formatter;
