//! Link sentiment resolution and merging

use crate::config::{LinkConfig, LinkLabelPolicy, LinkMergeStrategy};
use std::sync::Arc;
use stocksight_domain::traits::{LinkContentSource, SentimentService};
use stocksight_domain::{Label, SentimentVerdict, TokenSet};
use stocksight_gatekeeper::{clean, passes, strip_hashtags_and_mentions, FilterPolicy};
use stocksight_sentiment::{RemoteClassifier, SentimentScorer};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Scores the pages a post links to
///
/// A page only yields a verdict when it is reachable, is not a
/// social-platform permalink page, its keywords pass the filter policy and
/// it has a summary.
pub struct LinkSentimentResolver<S, R = RemoteClassifier> {
    source: S,
    scorer: Arc<SentimentScorer<R>>,
    config: LinkConfig,
    use_remote: bool,
}

impl<S, R> LinkSentimentResolver<S, R>
where
    S: LinkContentSource,
    R: SentimentService,
{
    /// Create a new resolver
    pub fn new(source: S, scorer: Arc<SentimentScorer<R>>, config: LinkConfig) -> Self {
        Self {
            source,
            scorer,
            config,
            use_remote: false,
        }
    }

    /// Consult the remote classifier when scoring page summaries
    pub fn with_remote(mut self, use_remote: bool) -> Self {
        self.use_remote = use_remote;
        self
    }

    /// Resolver configuration
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Score the page behind a single link
    pub async fn resolve(&self, url: &str, policy: &FilterPolicy) -> Option<SentimentVerdict> {
        info!("Following link {} to get sentiment", url);

        let page = match timeout(self.config.fetch_timeout(), self.source.fetch(url)).await {
            Ok(Ok(page)) => page,
            Ok(Err(e)) => {
                warn!("Error getting text from link {}: {}", url, e);
                return None;
            }
            Err(_) => {
                warn!("Timed out getting text from link {}", url);
                return None;
            }
        };

        if page.text.contains(&self.config.permalink_marker) {
            info!("Link {} is a social-platform page, skipping", url);
            return None;
        }

        let keywords: TokenSet = page.keywords.iter().map(|k| k.as_str()).collect();
        if keywords.is_empty() {
            debug!("Link {} has no keywords, skipping", url);
            return None;
        }
        if !passes(&keywords, policy) {
            debug!("Link {} keywords fail the token policy, skipping", url);
            return None;
        }

        let summary = strip_hashtags_and_mentions(&clean(&page.summary));
        if summary.is_empty() {
            debug!("No summary text found at {}", url);
            return None;
        }

        Some(self.scorer.score(&summary, self.use_remote).await)
    }

    /// Resolve each link in sequence, keeping the verdicts that resolved
    pub async fn resolve_all(&self, urls: &[String], policy: &FilterPolicy) -> Vec<SentimentVerdict> {
        let mut verdicts = Vec::new();
        for url in urls {
            if let Some(verdict) = self.resolve(url, policy).await {
                verdicts.push(verdict);
            }
        }
        verdicts
    }

    /// Resolve the links of a post and merge them into the post verdict
    pub async fn apply(&self, post: SentimentVerdict, urls: &[String], policy: &FilterPolicy) -> SentimentVerdict {
        let links = self.resolve_all(urls, policy).await;
        debug!("{} of {} links resolved", links.len(), urls.len());
        merge_verdicts(post, &links, self.config.merge_strategy, self.config.label_policy)
    }
}

/// Merge resolved link verdicts into the post verdict
///
/// With no resolved links the post verdict is returned unchanged.
pub fn merge_verdicts(
    post: SentimentVerdict,
    links: &[SentimentVerdict],
    strategy: LinkMergeStrategy,
    label_policy: LinkLabelPolicy,
) -> SentimentVerdict {
    if links.is_empty() {
        return post;
    }

    let (polarity, subjectivity) = match strategy {
        LinkMergeStrategy::RunningPairwise => links.iter().fold((0.0, 0.0), |(p, s), link| {
            ((p + link.polarity) / 2.0, (s + link.subjectivity) / 2.0)
        }),
        LinkMergeStrategy::Mean => {
            let n = links.len() as f64;
            (
                links.iter().map(|l| l.polarity).sum::<f64>() / n,
                links.iter().map(|l| l.subjectivity).sum::<f64>() / n,
            )
        }
    };

    let label = links
        .iter()
        .fold(post.label, |label, link| merge_label(label, link.label, label_policy));

    SentimentVerdict::new(
        (post.polarity + polarity) / 2.0,
        (post.subjectivity + subjectivity) / 2.0,
        label,
    )
}

/// Combine a post label with one link label
pub fn merge_label(post: Label, link: Label, policy: LinkLabelPolicy) -> Label {
    match policy {
        LinkLabelPolicy::KeepPost => post,
        LinkLabelPolicy::PreferPolar if link != post && link != Label::Neutral => link,
        LinkLabelPolicy::PreferPolar => post,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockLinkSource;
    use stocksight_domain::traits::PageContent;

    fn verdict(polarity: f64, subjectivity: f64, label: Label) -> SentimentVerdict {
        SentimentVerdict::new(polarity, subjectivity, label)
    }

    fn policy() -> FilterPolicy {
        FilterPolicy::new(vec!["bezos".into()], vec!["giveaway".into()], 1)
    }

    fn page(text: &str, summary: &str, keywords: &[&str]) -> PageContent {
        PageContent {
            text: text.to_string(),
            summary: summary.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn resolver(source: MockLinkSource) -> LinkSentimentResolver<MockLinkSource> {
        LinkSentimentResolver::new(source, Arc::new(SentimentScorer::local()), LinkConfig::default())
    }

    #[test]
    fn test_running_pairwise_merge() {
        let post = verdict(0.5, 0.4, Label::Positive);
        let links = [verdict(0.4, 0.8, Label::Positive), verdict(0.8, 0.4, Label::Positive)];
        let merged = merge_verdicts(post, &links, LinkMergeStrategy::RunningPairwise, LinkLabelPolicy::PreferPolar);
        // acc: 0 -> 0.2 -> 0.5 (polarity), 0 -> 0.4 -> 0.4 (subjectivity)
        assert!((merged.polarity - 0.5).abs() < 1e-9);
        assert!((merged.subjectivity - 0.4).abs() < 1e-9);
        assert_eq!(merged.label, Label::Positive);
    }

    #[test]
    fn test_mean_merge() {
        let post = verdict(0.5, 0.4, Label::Positive);
        let links = [verdict(0.4, 0.8, Label::Positive), verdict(0.8, 0.4, Label::Positive)];
        let merged = merge_verdicts(post, &links, LinkMergeStrategy::Mean, LinkLabelPolicy::PreferPolar);
        assert!((merged.polarity - 0.55).abs() < 1e-9);
        assert!((merged.subjectivity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_negative_link_flips_positive_post() {
        let post = verdict(0.4, 0.5, Label::Positive);
        let links = [verdict(-0.6, 0.7, Label::Negative)];
        let merged = merge_verdicts(post, &links, LinkMergeStrategy::RunningPairwise, LinkLabelPolicy::PreferPolar);
        assert_eq!(merged.label, Label::Negative);

        let kept = merge_verdicts(post, &links, LinkMergeStrategy::RunningPairwise, LinkLabelPolicy::KeepPost);
        assert_eq!(kept.label, Label::Positive);
    }

    #[test]
    fn test_no_links_keeps_post() {
        let post = verdict(0.3, 0.6, Label::Neutral);
        assert_eq!(merge_verdicts(post, &[], LinkMergeStrategy::Mean, LinkLabelPolicy::PreferPolar), post);
    }

    #[test]
    fn test_merge_label() {
        use Label::*;
        assert_eq!(merge_label(Neutral, Positive, LinkLabelPolicy::PreferPolar), Positive);
        assert_eq!(merge_label(Negative, Positive, LinkLabelPolicy::PreferPolar), Positive);
        assert_eq!(merge_label(Neutral, Negative, LinkLabelPolicy::PreferPolar), Negative);
        assert_eq!(merge_label(Negative, Neutral, LinkLabelPolicy::PreferPolar), Negative);
        assert_eq!(merge_label(Positive, Negative, LinkLabelPolicy::PreferPolar), Negative);
        assert_eq!(merge_label(Positive, Neutral, LinkLabelPolicy::PreferPolar), Positive);
        assert_eq!(merge_label(Positive, Negative, LinkLabelPolicy::KeepPost), Positive);
        assert_eq!(merge_label(Neutral, Positive, LinkLabelPolicy::KeepPost), Neutral);
    }

    #[tokio::test]
    async fn test_resolve_scores_summary() {
        let mut source = MockLinkSource::new();
        source.add_page(
            "https://news.example/a",
            page("Bezos story", "Great results for Bezos and #BlueOrigin", &["bezos", "results"]),
        );
        let verdict = resolver(source).resolve("https://news.example/a", &policy()).await;
        assert_eq!(verdict.map(|v| v.label), Some(Label::Positive));
    }

    #[tokio::test]
    async fn test_permalink_marker_skips() {
        let mut source = MockLinkSource::new();
        source.add_page(
            "https://twitter.com/x/status/1",
            page("Tweet with a location. Bezos", "Great news from Bezos", &["bezos"]),
        );
        assert!(resolver(source).resolve("https://twitter.com/x/status/1", &policy()).await.is_none());
    }

    #[tokio::test]
    async fn test_keyword_gates() {
        let mut source = MockLinkSource::new();
        source.add_page("https://a.example", page("text", "Great news", &[]));
        source.add_page("https://b.example", page("text", "Great news", &["tesla"]));
        source.add_page("https://c.example", page("text", "Great news", &["bezos", "giveaway"]));
        source.add_page("https://d.example", page("text", "", &["bezos"]));
        let resolver = resolver(source);

        for url in ["https://a.example", "https://b.example", "https://c.example", "https://d.example"] {
            assert!(resolver.resolve(url, &policy()).await.is_none(), "{} should not resolve", url);
        }
    }

    #[tokio::test]
    async fn test_fetch_error_is_no_verdict() {
        let mut source = MockLinkSource::new();
        source.add_error("https://down.example");
        let resolver = resolver(source);
        assert!(resolver.resolve("https://down.example", &policy()).await.is_none());
        assert!(resolver.resolve("https://unknown.example", &policy()).await.is_none());
    }

    #[tokio::test]
    async fn test_apply_merges_resolved_links() {
        let mut source = MockLinkSource::new();
        source.add_page("https://a.example", page("text", "Great results for Bezos", &["bezos"]));
        source.add_error("https://b.example");
        let resolver = resolver(source.clone());

        let post = verdict(0.0, 0.0, Label::Neutral);
        let urls = vec!["https://a.example".to_string(), "https://b.example".to_string()];
        let merged = resolver.apply(post, &urls, &policy()).await;

        assert_eq!(source.call_count(), 2);
        assert_eq!(merged.label, Label::Positive);
        assert!(merged.polarity > 0.0);
    }
}
