//! Stocksight CLI - filter and score stock-related posts, poll stock prices.

use clap::Parser;
use stocksight_cli::commands;
use stocksight_cli::{logging, AppConfig, Cli, Command, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> stocksight_cli::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli);

    let config = AppConfig::load(cli.config.as_deref())?;
    let formatter = Formatter::new(!cli.no_color);

    match cli.command {
        Command::Tweets(args) => commands::execute_tweets(args, config, cli.verbose, formatter).await,
        Command::Price(args) => commands::execute_price(args, config, formatter).await,
    }
}
