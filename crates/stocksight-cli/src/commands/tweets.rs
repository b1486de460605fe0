//! Tweets command implementation.

use crate::cli::TweetsArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::sync::Arc;
use stocksight_extractor::{ArticleFetcher, LinkSentimentResolver};
use stocksight_gatekeeper::FilterPolicy;
use stocksight_pipeline::{JsonLinesSource, PipelineMetrics, PostPipeline, StreamWorker};
use stocksight_sentiment::SentimentScorer;
use stocksight_store::{ConfiguredStore, DocumentKind};
use tracing::info;

/// Execute the tweets command.
pub async fn execute_tweets(args: TweetsArgs, mut config: AppConfig, verbose: bool, formatter: Formatter) -> Result<()> {
    config.override_tokens(&args.override_tokens_required, &args.override_tokens_ignored);
    if args.link_sentiment {
        config.pipeline.follow_links = true;
    }
    if args.web_sentiment {
        config.pipeline.use_remote_sentiment = true;
    }
    config.validate()?;

    let keywords = track_keywords(&args.keywords, args.add_tokens, &config.filter);
    if keywords.is_empty() {
        return Err(CliError::InvalidInput("No keywords to track".to_string()));
    }
    info!("Tracking posts about {} with keywords: {}", args.symbol, keywords.join(", "));
    info!("Required tokens: {:?}", config.filter.required);
    info!("Ignored tokens: {:?}", config.filter.ignored);

    let fetcher = ArticleFetcher::new(&config.links)?;
    if let Some(url) = &args.url {
        let handles = fetcher.discover_handles(url).await?;
        if handles.is_empty() {
            return Err(CliError::NoHandles(url.clone()));
        }
        info!("Following {} authors: {}", handles.len(), handles.join(", "));
    }

    let remote = config.sentiment.build_remote()?;
    if let Some(notice) = remote_notice(config.pipeline.use_remote_sentiment, remote.is_some()) {
        eprintln!("{}", formatter.warning(notice));
    }
    let scorer = Arc::new(match remote {
        Some(classifier) => SentimentScorer::with_remote(classifier).with_remote_timeout(config.sentiment.timeout()),
        None => SentimentScorer::local(),
    });

    let store = ConfiguredStore::open(&config.store, &args.index, DocumentKind::Posts).await?;

    let use_remote = config.pipeline.use_remote_sentiment;
    let follow_links = config.pipeline.follow_links;
    let mut pipeline = PostPipeline::new(store, scorer.clone(), config.pipeline);
    if follow_links {
        let resolver = LinkSentimentResolver::new(fetcher, scorer, config.links).with_remote(use_remote);
        pipeline = pipeline.with_links(resolver);
    }

    let mut worker = StreamWorker::new(pipeline, config.filter);
    if verbose {
        worker = worker.with_progress(move |metrics| eprintln!("{}", formatter.progress(metrics)));
    }

    let metrics = if args.input == "-" {
        info!("Reading posts from stdin");
        worker.run(JsonLinesSource::stdin()).await?
    } else {
        info!("Reading posts from {}", args.input);
        worker.run(JsonLinesSource::open(&args.input).await?).await?
    };

    eprintln!("{}", formatter.success(&finished_message(&metrics)));
    Ok(())
}

/// Keywords handed to the stream collaborator.
///
/// Entries are trimmed and lower-cased; with `add_tokens` the policy's
/// required tokens are appended. Duplicates keep their first position.
pub fn track_keywords(keywords: &[String], add_tokens: bool, policy: &FilterPolicy) -> Vec<String> {
    let extra: &[String] = if add_tokens { policy.required.as_slice() } else { &[] };

    let mut out: Vec<String> = Vec::new();
    for keyword in keywords.iter().chain(extra) {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && !out.contains(&keyword) {
            out.push(keyword);
        }
    }
    out
}

/// Notice shown when remote scoring is requested but cannot be used.
fn remote_notice(requested: bool, configured: bool) -> Option<&'static str> {
    (requested && !configured).then_some("Remote sentiment requested but no remote_url is configured, using local scoring only")
}

fn finished_message(metrics: &PipelineMetrics) -> String {
    format!(
        "Finished: {} posts, {} stored, {} filtered",
        metrics.processed, metrics.emitted, metrics.filtered
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_keywords_trims_and_dedupes() {
        let keywords = vec!["Amazon".to_string(), " bezos ".to_string(), "amazon".to_string(), "".to_string()];
        let tracked = track_keywords(&keywords, false, &FilterPolicy::default());
        assert_eq!(tracked, vec!["amazon", "bezos"]);
    }

    #[test]
    fn test_track_keywords_adds_required_tokens() {
        let policy = FilterPolicy::new(vec!["blue origin".into(), "bezos".into()], vec![], 1);
        let tracked = track_keywords(&["bezos".to_string()], true, &policy);
        assert_eq!(tracked, vec!["bezos", "blue origin"]);
    }

    #[test]
    fn test_remote_notice_only_when_unconfigured() {
        assert!(remote_notice(true, false).is_some());
        assert!(remote_notice(true, true).is_none());
        assert!(remote_notice(false, false).is_none());
    }

    #[test]
    fn test_finished_message() {
        let mut metrics = PipelineMetrics::new();
        metrics.processed = 3;
        metrics.emitted = 2;
        metrics.filtered = 1;
        assert_eq!(finished_message(&metrics), "Finished: 3 posts, 2 stored, 1 filtered");
    }
}
