//! Combination of the sentiment signals into one verdict

use crate::estimator::{PolarityEstimate, PolarityEstimator};
use crate::remote::RemoteClassifier;
use crate::rules::{RuleBasedAnalyzer, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
use std::time::Duration;
use stocksight_domain::traits::SentimentService;
use stocksight_domain::{Label, SentimentVerdict};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Default upper bound for a remote classification
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Scores text with two local signals and an optional remote one
///
/// The remote classifier only ever influences the label; the numeric
/// fields always come from the local signals.
///
/// # Examples
///
/// ```
/// use stocksight_sentiment::SentimentScorer;
/// use stocksight_domain::Label;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let scorer = SentimentScorer::local();
/// let verdict = scorer.score("What a great launch", false).await;
/// assert_eq!(verdict.label, Label::Positive);
/// # }
/// ```
pub struct SentimentScorer<R = RemoteClassifier> {
    rules: RuleBasedAnalyzer,
    estimator: PolarityEstimator,
    remote: Option<R>,
    remote_timeout: Duration,
}

impl SentimentScorer<RemoteClassifier> {
    /// Create a scorer with only the local signals
    pub fn local() -> Self {
        Self {
            rules: RuleBasedAnalyzer::new(),
            estimator: PolarityEstimator::new(),
            remote: None,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

impl<R: SentimentService> SentimentScorer<R> {
    /// Create a scorer that can consult a remote classifier
    pub fn with_remote(remote: R) -> Self {
        Self {
            rules: RuleBasedAnalyzer::new(),
            estimator: PolarityEstimator::new(),
            remote: Some(remote),
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    /// Set the upper bound for a remote classification
    pub fn with_remote_timeout(mut self, remote_timeout: Duration) -> Self {
        self.remote_timeout = remote_timeout;
        self
    }

    /// Whether a remote classifier is configured
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Score text
    ///
    /// The remote classifier is consulted only when `use_remote` is set;
    /// any failure there counts as "no remote verdict".
    pub async fn score(&self, text: &str, use_remote: bool) -> SentimentVerdict {
        let remote = if use_remote { self.remote_label(text).await } else { None };
        let compound = self.rules.compound(text);
        let estimate = self.estimator.estimate(text);

        debug!(
            "Sentiment signals: compound={:.3} polarity={:.3} subjectivity={:.3} remote={:?}",
            compound, estimate.polarity, estimate.subjectivity, remote
        );

        combine(compound, estimate, remote)
    }

    async fn remote_label(&self, text: &str) -> Option<Label> {
        let remote = self.remote.as_ref()?;
        match timeout(self.remote_timeout, remote.classify(text)).await {
            Ok(Ok(reading)) => Some(reading.label),
            Ok(Err(e)) => {
                warn!("Remote sentiment unavailable: {}", e);
                None
            }
            Err(_) => {
                warn!("Remote sentiment timed out after {:?}", self.remote_timeout);
                None
            }
        }
    }
}

/// Label of the rule-based compound score
pub fn compound_label(compound: f64) -> Label {
    if compound <= NEGATIVE_THRESHOLD {
        Label::Negative
    } else if compound >= POSITIVE_THRESHOLD {
        Label::Positive
    } else {
        Label::Neutral
    }
}

/// Label of the estimator polarity
pub fn estimate_label(estimate: &PolarityEstimate) -> Label {
    if estimate.polarity < 0.0 {
        Label::Negative
    } else if estimate.polarity > 0.0 {
        Label::Positive
    } else {
        Label::Neutral
    }
}

/// Combine the signals into a verdict
///
/// Polarity is the mean of the compound score and the estimator polarity;
/// subjectivity is the estimator's. A polar label requires both numeric
/// signals, and the remote label when present, to agree; anything else is
/// neutral.
pub fn combine(compound: f64, estimate: PolarityEstimate, remote: Option<Label>) -> SentimentVerdict {
    let rule = compound_label(compound);
    let est = estimate_label(&estimate);

    let agrees = |target: Label| rule == target && est == target && remote.map_or(true, |r| r == target);
    let label = if agrees(Label::Negative) {
        Label::Negative
    } else if agrees(Label::Positive) {
        Label::Positive
    } else {
        Label::Neutral
    };

    SentimentVerdict::new((estimate.polarity + compound) / 2.0, estimate.subjectivity, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockClassifier;

    #[test]
    fn test_both_positive_without_remote() {
        let verdict = combine(0.6, PolarityEstimate::new(0.4, 0.5), None);
        assert_eq!(verdict.label, Label::Positive);
        assert!((verdict.polarity - 0.5).abs() < 1e-9);
        assert_eq!(verdict.subjectivity, 0.5);
    }

    #[test]
    fn test_positive_and_neutral_is_neutral() {
        let verdict = combine(0.6, PolarityEstimate::new(0.0, 0.0), None);
        assert_eq!(verdict.label, Label::Neutral);

        let verdict = combine(0.01, PolarityEstimate::new(0.5, 0.3), None);
        assert_eq!(verdict.label, Label::Neutral);
    }

    #[test]
    fn test_both_negative_without_remote() {
        let verdict = combine(-0.05, PolarityEstimate::new(-0.2, 0.9), None);
        assert_eq!(verdict.label, Label::Negative);
    }

    #[test]
    fn test_remote_must_agree() {
        let estimate = PolarityEstimate::new(0.4, 0.5);
        assert_eq!(combine(0.6, estimate, Some(Label::Positive)).label, Label::Positive);
        assert_eq!(combine(0.6, estimate, Some(Label::Neutral)).label, Label::Neutral);
        assert_eq!(combine(0.6, estimate, Some(Label::Negative)).label, Label::Neutral);
    }

    #[test]
    fn test_remote_does_not_change_numbers() {
        let estimate = PolarityEstimate::new(0.4, 0.5);
        let with = combine(0.6, estimate, Some(Label::Negative));
        let without = combine(0.6, estimate, None);
        assert_eq!(with.polarity, without.polarity);
        assert_eq!(with.subjectivity, without.subjectivity);
    }

    #[tokio::test]
    async fn test_score_local() {
        let scorer = SentimentScorer::local();
        assert_eq!(scorer.score("great results, very strong quarter", false).await.label, Label::Positive);
        assert_eq!(scorer.score("terrible results and a bad quarter", false).await.label, Label::Negative);
        assert_eq!(scorer.score("launch scheduled for tuesday", false).await, SentimentVerdict::neutral());
    }

    #[tokio::test]
    async fn test_remote_consulted_only_when_requested() {
        let remote = MockClassifier::new(Label::Negative);
        let scorer = SentimentScorer::with_remote(remote.clone());

        let verdict = scorer.score("great results", false).await;
        assert_eq!(verdict.label, Label::Positive);
        assert_eq!(remote.call_count(), 0);

        let verdict = scorer.score("great results", true).await;
        assert_eq!(verdict.label, Label::Neutral);
        assert_eq!(remote.call_count(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_means_no_verdict() {
        let mut remote = MockClassifier::new(Label::Negative);
        remote.add_error("great results");
        let scorer = SentimentScorer::with_remote(remote);

        let verdict = scorer.score("great results", true).await;
        assert_eq!(verdict.label, Label::Positive);
    }
}
