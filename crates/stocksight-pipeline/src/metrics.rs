//! Metrics collection for the post pipeline

/// Counters kept while processing the stream
///
/// `processed` counts every payload received; `filtered` counts content
/// drops (empty text, empty tokens, policy rejections).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineMetrics {
    /// Payloads received
    pub processed: u64,

    /// Content drops
    pub filtered: u64,

    /// Records handed to the store successfully
    pub emitted: u64,

    /// Store writes that failed or timed out
    pub write_failures: u64,

    /// Malformed payloads
    pub protocol_errors: u64,

    /// Posts without usable text
    pub empty_text: u64,

    /// Posts without filter tokens
    pub empty_tokens: u64,

    /// Posts rejected by the token policy
    pub policy_rejections: u64,
}

impl PipelineMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of processed payloads that were filtered
    pub fn filtered_ratio(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.filtered as f64 / self.processed as f64
        }
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// One-line progress report
    pub fn progress_line(&self) -> String {
        format!(
            "tweets: {} | filtered: {} | filtered-ratio: {:.2}",
            self.processed,
            self.filtered,
            self.filtered_ratio()
        )
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = [
            "Pipeline Metrics Summary".to_string(),
            "========================".to_string(),
            format!("Processed: {}", self.processed),
            format!("Emitted: {}", self.emitted),
            format!("Filtered: {} ({:.1}%)", self.filtered, self.filtered_ratio() * 100.0),
            format!("  Empty text: {}", self.empty_text),
            format!("  Empty tokens: {}", self.empty_tokens),
            format!("  Policy: {}", self.policy_rejections),
            format!("Write failures: {}", self.write_failures),
            format!("Malformed payloads: {}", self.protocol_errors),
        ];
        lines.join("\n")
    }
}
