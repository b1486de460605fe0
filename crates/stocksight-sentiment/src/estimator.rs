//! General-purpose polarity and subjectivity estimation
//!
//! Averages the (polarity, subjectivity) entries of the opinion words found
//! in a text. A preceding intensifier scales the entry; a preceding
//! negation halves and flips its polarity.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const NEGATION_FACTOR: f64 = -0.5;

/// (word, polarity, subjectivity)
const ENTRIES: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6), ("great", 0.8, 0.75), ("excellent", 1.0, 1.0), ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0), ("best", 1.0, 0.3), ("better", 0.5, 0.5), ("nice", 0.6, 1.0),
    ("happy", 0.8, 1.0), ("wonderful", 1.0, 1.0), ("fantastic", 0.4, 0.9), ("strong", 0.43, 0.73),
    ("positive", 0.23, 0.55), ("bullish", 0.5, 0.6), ("impressive", 1.0, 1.0),
    ("exciting", 0.3, 0.8), ("excited", 0.38, 0.75), ("new", 0.14, 0.45), ("successful", 0.75, 0.95),
    ("brilliant", 0.9, 1.0), ("perfect", 1.0, 1.0), ("innovative", 0.5, 0.75), ("cool", 0.35, 0.65),
    ("fun", 0.3, 0.2), ("love", 0.5, 0.6), ("beautiful", 0.85, 1.0), ("smart", 0.21, 0.64),
    ("huge", 0.4, 0.9), ("big", 0.0, 0.1), ("high", 0.16, 0.54), ("easy", 0.43, 0.83),
    ("free", 0.4, 0.8), ("interesting", 0.5, 0.5), ("incredible", 0.9, 0.9), ("proud", 0.8, 1.0),
    ("bad", -0.7, 0.67), ("terrible", -1.0, 1.0), ("awful", -1.0, 1.0), ("worst", -1.0, 1.0),
    ("worse", -0.4, 0.6), ("poor", -0.4, 0.6), ("sad", -0.5, 1.0), ("hate", -0.8, 0.9),
    ("horrible", -1.0, 1.0), ("weak", -0.38, 0.63), ("negative", -0.3, 0.4), ("bearish", -0.5, 0.6),
    ("disappointing", -0.6, 0.7), ("disappointed", -0.75, 0.75), ("wrong", -0.5, 0.9),
    ("stupid", -0.8, 1.0), ("ugly", -0.7, 1.0), ("boring", -1.0, 1.0), ("angry", -0.5, 1.0),
    ("dead", -0.2, 0.4), ("broken", -0.4, 0.4), ("low", 0.0, 0.3), ("risky", -0.4, 0.7),
    ("dangerous", -0.6, 0.9), ("expensive", -0.5, 0.7), ("slow", -0.3, 0.39), ("hard", -0.29, 0.54),
    ("difficult", -0.5, 1.0), ("fake", -0.5, 1.0), ("crazy", -0.6, 0.9), ("scary", -0.5, 1.0),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3), ("really", 1.3), ("extremely", 1.5), ("incredibly", 1.4), ("highly", 1.3),
    ("so", 1.3), ("super", 1.4), ("quite", 1.1), ("pretty", 1.1), ("too", 1.2),
    ("slightly", 0.6), ("somewhat", 0.8), ("barely", 0.5), ("fairly", 0.9),
];

const NEGATIONS: &[&str] = &["not", "never", "no", "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "cant", "wont"];

static LEXICON: Lazy<HashMap<&'static str, (f64, f64)>> =
    Lazy::new(|| ENTRIES.iter().map(|(w, p, s)| (*w, (*p, *s))).collect());

static INTENSITY: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| INTENSIFIERS.iter().copied().collect());

/// Polarity in [-1, 1] and subjectivity in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityEstimate {
    /// Signed sentiment strength
    pub polarity: f64,
    /// Opinion versus fact
    pub subjectivity: f64,
}

impl PolarityEstimate {
    /// Create an estimate, clamping into range
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

/// Opinion-word polarity and subjectivity estimator
#[derive(Debug, Clone, Default)]
pub struct PolarityEstimator;

impl PolarityEstimator {
    /// Create a new estimator
    pub fn new() -> Self {
        Self
    }

    /// Estimate polarity and subjectivity of a text
    pub fn estimate(&self, text: &str) -> PolarityEstimate {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_lowercase()
                    .replace('\'', "")
            })
            .filter(|w| !w.is_empty())
            .collect();

        let mut assessments: Vec<(f64, f64)> = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = LEXICON.get(word.as_str()) else {
                continue;
            };

            let mut cursor = i;
            if cursor > 0 {
                if let Some(&factor) = INTENSITY.get(words[cursor - 1].as_str()) {
                    polarity *= factor;
                    subjectivity *= factor;
                    cursor -= 1;
                }
            }
            if cursor > 0 && NEGATIONS.contains(&words[cursor - 1].as_str()) {
                polarity *= NEGATION_FACTOR;
            }

            assessments.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));
        }

        if assessments.is_empty() {
            return PolarityEstimate::default();
        }

        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|(_, s)| s).sum::<f64>() / n;
        PolarityEstimate::new(polarity, subjectivity)
    }
}
