//! Sentiment module - labels and combined verdicts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Positive sentiment
    Positive,

    /// Negative sentiment
    Negative,

    /// Neither, or the signals disagree
    Neutral,
}

impl Label {
    /// Get the label name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
            Label::Neutral => "neutral",
        }
    }

    /// Parse a label from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "positive" => Some(Label::Positive),
            "negative" => Some(Label::Negative),
            "neutral" => Some(Label::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combined outcome of sentiment analysis
///
/// Polarity lies in [-1, 1] and subjectivity in [0, 1]; both are clamped on
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentVerdict {
    /// Signed sentiment strength
    pub polarity: f64,

    /// Opinion-based (1.0) versus factual (0.0) tone
    pub subjectivity: f64,

    /// Categorical label
    pub label: Label,
}

impl SentimentVerdict {
    /// Create a verdict, clamping the numeric fields into range
    pub fn new(polarity: f64, subjectivity: f64, label: Label) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
            label,
        }
    }

    /// The fallback verdict when no source yields a signal
    pub fn neutral() -> Self {
        Self::new(0.0, 0.0, Label::Neutral)
    }
}

impl Default for SentimentVerdict {
    fn default() -> Self {
        Self::neutral()
    }
}
