//! Price command implementation.

use crate::cli::PriceArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use stocksight_price::{PollerMetrics, PriceFeed, PricePoller};
use stocksight_store::{ConfiguredStore, DocumentKind};

/// Execute the price command.
pub async fn execute_price(args: PriceArgs, config: AppConfig, formatter: Formatter) -> Result<()> {
    let symbol = args.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(CliError::InvalidInput("No stock symbol given".to_string()));
    }
    config.store.validate()?;
    config.price.validate()?;

    let feed = PriceFeed::new(&config.price)?;
    let store = ConfiguredStore::open(&config.store, &args.index, DocumentKind::Quotes).await?;

    eprintln!("{}", formatter.info(&format!("Polling {} into index {}", symbol, args.index)));
    let mut poller = PricePoller::new(feed, store, symbol, config.price);
    let metrics = poller.run().await?;

    eprintln!("{}", formatter.success(&stopped_message(&metrics)));
    Ok(())
}

fn stopped_message(metrics: &PollerMetrics) -> String {
    format!(
        "Stopped: {} polls, {} quotes stored, {} fetch failures",
        metrics.polls, metrics.quotes_written, metrics.fetch_failures
    )
}
