//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stocksight - score the sentiment of stock-related posts and track prices.
#[derive(Debug, Parser)]
#[command(name = "stocksight")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ./stocksight.toml when present)
    #[arg(short, long, global = true, env = "STOCKSIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print a progress line after every post
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Debug message output
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub debug: bool,

    /// Run quiet with no log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter and score a stream of posts
    Tweets(TweetsArgs),

    /// Poll a stock price and store snapshots
    Price(PriceArgs),
}

/// Arguments for the tweets command.
#[derive(Debug, Parser)]
pub struct TweetsArgs {
    /// Stock symbol the posts are about, e.g. AMZN
    #[arg(short, long)]
    pub symbol: String,

    /// Keywords to track, comma separated
    #[arg(short, long, required = true, value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// Add the required filter tokens to the tracked keywords
    #[arg(short, long)]
    pub add_tokens: bool,

    /// Page to scan for author handles to follow
    #[arg(short, long)]
    pub url: Option<String>,

    /// Follow links in posts and merge their sentiment
    #[arg(short, long)]
    pub link_sentiment: bool,

    /// Also consult the remote sentiment service
    #[arg(short, long)]
    pub web_sentiment: bool,

    /// Index to write records to
    #[arg(short, long, default_value = "stock-tweet")]
    pub index: String,

    /// Replace the required filter tokens
    #[arg(long, num_args = 1..)]
    pub override_tokens_required: Vec<String>,

    /// Replace the ignored filter tokens
    #[arg(long, num_args = 1..)]
    pub override_tokens_ignored: Vec<String>,

    /// Payload stream, one JSON post per line ("-" for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,
}

/// Arguments for the price command.
#[derive(Debug, Parser)]
pub struct PriceArgs {
    /// Stock symbol, e.g. TSLA
    #[arg(short, long)]
    pub symbol: String,

    /// Index to write quotes to
    #[arg(short, long, default_value = "stock-price")]
    pub index: String,
}
