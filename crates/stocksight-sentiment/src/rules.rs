//! Rule-based lexicon scoring
//!
//! Produces a compound score in [-1, 1] from word valences, adjusted by
//! boosters, negations, contrastive "but", ALL-CAPS emphasis and
//! punctuation. Valences are on a [-4, 4] scale.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const BOOST_INCR: f64 = 0.293;
const BOOST_DECR: f64 = -0.293;
const CAPS_INCR: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Label thresholds on the compound score
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Label thresholds on the compound score
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

const VALENCES: &[(&str, f64)] = &[
    ("good", 1.9), ("great", 3.1), ("excellent", 2.7), ("amazing", 2.8), ("awesome", 3.1),
    ("best", 3.2), ("better", 1.9), ("nice", 1.8), ("happy", 2.7), ("love", 3.2),
    ("loves", 2.7), ("loved", 2.9), ("like", 1.5), ("likes", 1.8), ("wonderful", 2.7),
    ("fantastic", 2.6), ("strong", 2.3), ("stronger", 1.6), ("win", 2.8), ("wins", 2.7),
    ("winning", 2.4), ("success", 2.7), ("successful", 2.8), ("gain", 2.4), ("gains", 1.4),
    ("profit", 1.9), ("profits", 1.9), ("growth", 1.6), ("grow", 1.7), ("boost", 1.7),
    ("impressive", 2.3), ("exciting", 2.2), ("excited", 1.4), ("optimistic", 1.3),
    ("positive", 2.6), ("bullish", 1.9), ("rally", 1.5), ("soar", 2.0), ("soars", 2.0),
    ("surge", 1.3), ("record", 0.7), ("beat", 0.6), ("upgrade", 1.5), ("innovative", 2.1),
    ("brilliant", 2.8), ("glad", 2.0), ("thanks", 1.9), ("thank", 1.5), ("congrats", 2.4),
    ("perfect", 2.7), ("fun", 2.3), ("cool", 1.3), ("proud", 2.1), ("wow", 2.8),
    ("yes", 1.7), ("agree", 1.5), ("support", 1.7), ("hope", 1.9), ("safe", 1.9),
    ("bad", -2.5), ("terrible", -2.1), ("awful", -2.0), ("worst", -3.1), ("worse", -2.1),
    ("poor", -2.1), ("sad", -2.1), ("hate", -2.7), ("hates", -1.9), ("horrible", -2.5),
    ("weak", -1.9), ("negative", -2.7), ("bearish", -1.9), ("loss", -1.3), ("losses", -1.7),
    ("lose", -1.7), ("losing", -1.6), ("lost", -1.3), ("fail", -2.5), ("fails", -1.8),
    ("failure", -2.3), ("crash", -1.7), ("crashes", -1.7), ("drop", -1.1), ("plunge", -1.9),
    ("decline", -1.1), ("fear", -2.2), ("scared", -2.2), ("worried", -1.2), ("worry", -1.9),
    ("angry", -2.3), ("disappointing", -2.2), ("disappointed", -1.9), ("problem", -1.7),
    ("problems", -1.7), ("risk", -1.1), ("risky", -0.8), ("scam", -2.5), ("fraud", -2.8),
    ("lawsuit", -0.9), ("sue", -1.5), ("debt", -1.5), ("downgrade", -1.5), ("layoffs", -1.8),
    ("crisis", -3.1), ("kill", -3.7), ("killed", -3.5), ("dead", -3.3), ("die", -2.9),
    ("wrong", -2.1), ("stupid", -2.4), ("ugly", -2.3), ("sucks", -1.5),
    ("damn", -1.7), ("broken", -2.1), ("delay", -1.3), ("delayed", -0.9), ("cancel", -1.0),
];

const BOOSTERS_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly",
    "deeply", "enormously", "entirely", "especially", "exceptionally", "extremely",
    "fabulously", "fully", "greatly", "highly", "hugely", "incredibly", "intensely",
    "majorly", "more", "most", "particularly", "purely", "quite", "really", "remarkably",
    "so", "substantially", "thoroughly", "totally", "tremendously", "truly",
    "unbelievably", "unusually", "utterly", "very",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "less", "little", "marginally", "occasionally",
    "partly", "scarcely", "slightly", "somewhat",
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "nowhere", "cannot",
    "without", "rarely", "seldom", "despite", "aint", "dont", "doesnt", "didnt", "isnt",
    "arent", "wasnt", "werent", "wont", "wouldnt", "shouldnt", "couldnt", "cant", "havent",
    "hasnt", "hadnt",
];

static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| VALENCES.iter().copied().collect());

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    BOOSTERS_UP
        .iter()
        .map(|w| (*w, BOOST_INCR))
        .chain(BOOSTERS_DOWN.iter().map(|w| (*w, BOOST_DECR)))
        .collect()
});

/// Valence breakdown of a text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RuleScores {
    /// Normalized sum of valences, in [-1, 1]
    pub compound: f64,
    /// Share of positive weight
    pub positive: f64,
    /// Share of negative weight
    pub negative: f64,
    /// Share of neutral words
    pub neutral: f64,
}

/// Lexicon and rule based analyzer
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAnalyzer;

impl RuleBasedAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Compound score in [-1, 1]
    pub fn compound(&self, text: &str) -> f64 {
        self.scores(text).compound
    }

    /// Full valence breakdown
    pub fn scores(&self, text: &str) -> RuleScores {
        let words: Vec<&str> = text
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return RuleScores::default();
        }

        let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase().replace('\'', "")).collect();
        let caps_differential = has_caps_differential(&words);

        let mut sentiments: Vec<f64> = Vec::with_capacity(words.len());
        for (i, word) in lowered.iter().enumerate() {
            if BOOSTERS.contains_key(word.as_str()) {
                sentiments.push(0.0);
                continue;
            }
            let Some(&base) = LEXICON.get(word.as_str()) else {
                sentiments.push(0.0);
                continue;
            };

            let mut valence = base;
            if caps_differential && is_all_caps(words[i]) {
                valence += CAPS_INCR.copysign(valence);
            }

            for distance in 0..3 {
                if i <= distance {
                    break;
                }
                let prev_idx = i - distance - 1;
                let prev = lowered[prev_idx].as_str();
                if LEXICON.contains_key(prev) {
                    continue;
                }

                let mut scalar = booster_scalar(prev, words[prev_idx], valence, caps_differential);
                if distance == 1 {
                    scalar *= 0.95;
                } else if distance == 2 {
                    scalar *= 0.9;
                }
                valence += scalar;

                if NEGATIONS.contains(&prev) {
                    valence *= NEGATION_SCALAR;
                }
            }

            sentiments.push(valence);
        }

        apply_but_rule(&lowered, &mut sentiments);
        let amplifier = punctuation_amplifier(text);

        let mut sum: f64 = sentiments.iter().sum();
        if sum > 0.0 {
            sum += amplifier;
        } else if sum < 0.0 {
            sum -= amplifier;
        }
        let compound = (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);

        let (mut pos, mut neg, mut neu) = (0.0, 0.0, 0.0);
        for s in &sentiments {
            if *s > 0.0 {
                pos += s + 1.0;
            } else if *s < 0.0 {
                neg += s - 1.0;
            } else {
                neu += 1.0;
            }
        }
        if pos > neg.abs() {
            pos += amplifier;
        } else if pos < neg.abs() {
            neg -= amplifier;
        }
        let total = pos + neg.abs() + neu;

        RuleScores {
            compound,
            positive: pos / total,
            negative: neg.abs() / total,
            neutral: neu / total,
        }
    }
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && word.chars().all(|c| !c.is_lowercase())
}

fn has_caps_differential(words: &[&str]) -> bool {
    let caps = words.iter().filter(|w| is_all_caps(w)).count();
    caps > 0 && caps < words.len()
}

fn booster_scalar(lowered: &str, original: &str, valence: f64, caps_differential: bool) -> f64 {
    let Some(&base) = BOOSTERS.get(lowered) else {
        return 0.0;
    };
    let mut scalar = if valence < 0.0 { -base } else { base };
    if caps_differential && is_all_caps(original) {
        scalar += CAPS_INCR.copysign(valence);
    }
    scalar
}

fn apply_but_rule(words: &[String], sentiments: &mut [f64]) {
    let Some(but_idx) = words.iter().position(|w| w == "but") else {
        return;
    };
    for (i, s) in sentiments.iter_mut().enumerate() {
        if i < but_idx {
            *s *= 0.5;
        } else if i > but_idx {
            *s *= 1.5;
        }
    }
}

fn punctuation_amplifier(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + question_amp
}
