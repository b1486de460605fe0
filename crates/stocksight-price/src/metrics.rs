//! Metrics collection for the price poller

/// Counters kept across poll cycles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollerMetrics {
    /// Poll cycles attempted
    pub polls: u64,

    /// Quotes written to the store
    pub quotes_written: u64,

    /// Polls whose snapshot lacked last, high or low
    pub incomplete: u64,

    /// Polls that failed to fetch or decode
    pub fetch_failures: u64,

    /// Quotes the store failed to accept
    pub write_failures: u64,
}

impl PollerMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        [
            "Price Poller Metrics Summary".to_string(),
            "============================".to_string(),
            format!("Polls: {}", self.polls),
            format!("Quotes written: {}", self.quotes_written),
            format!("Incomplete snapshots: {}", self.incomplete),
            format!("Fetch failures: {}", self.fetch_failures),
            format!("Write failures: {}", self.write_failures),
        ]
        .join("\n")
    }
}
