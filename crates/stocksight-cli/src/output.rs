//! Output formatting for the CLI.

use colored::*;
use stocksight_pipeline::PipelineMetrics;

/// Output formatter.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Per-post progress line: processed, filtered and the filtered ratio.
    pub fn progress(&self, metrics: &PipelineMetrics) -> String {
        if !self.color_enabled {
            return metrics.progress_line();
        }

        format!(
            "{} {} | {} {} | {} {}",
            "tweets:".cyan(),
            metrics.processed.to_string().bold(),
            "filtered:".cyan(),
            metrics.filtered.to_string().yellow(),
            "filtered-ratio:".cyan(),
            format!("{:.2}", metrics.filtered_ratio()).green()
        )
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
