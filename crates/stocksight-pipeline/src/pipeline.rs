//! Per-post processing: filter, score, follow links, emit

use crate::payload::decode_post;
use crate::{PipelineConfig, PipelineError, PipelineMetrics};
use std::sync::Arc;
use stocksight_domain::traits::{LinkContentSource, RecordStore, SentimentService};
use stocksight_domain::{NormalizedRecord, RawPost};
use stocksight_extractor::{ArticleFetcher, LinkSentimentResolver};
use stocksight_gatekeeper::{clean, evaluate, strip_hashtags_and_mentions, tokenize, FilterDecision, FilterPolicy, RejectionReason};
use stocksight_sentiment::{RemoteClassifier, SentimentScorer};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Why a post was dropped before scoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRejection {
    /// No text, or nothing left after cleaning
    TextEmpty,
    /// No filter tokens left after tokenization
    TokensEmpty,
    /// The token policy rejected the post
    Policy(RejectionReason),
}

/// Terminal state of one post
#[derive(Debug, Clone, PartialEq)]
pub enum PostOutcome {
    /// The record was written to the store
    Emitted(NormalizedRecord),
    /// The post was dropped; nothing was written
    Rejected(ContentRejection),
    /// The record was built but the store write failed or timed out
    WriteFailed(NormalizedRecord),
}

impl PostOutcome {
    /// Whether the record reached the store
    pub fn is_emitted(&self) -> bool {
        matches!(self, PostOutcome::Emitted(_))
    }
}

/// Processes posts one at a time into the store
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use stocksight_domain::RawPost;
/// use stocksight_gatekeeper::FilterPolicy;
/// use stocksight_pipeline::{PipelineConfig, PostPipeline};
/// use stocksight_sentiment::SentimentScorer;
/// use stocksight_store::MemoryStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store = MemoryStore::new();
/// let mut pipeline = PostPipeline::new(store.clone(), Arc::new(SentimentScorer::local()), PipelineConfig::default());
///
/// let post = RawPost::new(1, "Amazon posts great results", "2018-10-10T20:19:24");
/// let outcome = pipeline.process(&post, &FilterPolicy::default()).await;
/// assert!(outcome.is_emitted());
/// assert_eq!(store.posts().len(), 1);
/// # }
/// ```
pub struct PostPipeline<St, L = ArticleFetcher, R = RemoteClassifier> {
    store: St,
    scorer: Arc<SentimentScorer<R>>,
    links: Option<LinkSentimentResolver<L, R>>,
    config: PipelineConfig,
    metrics: PipelineMetrics,
}

impl<St, R> PostPipeline<St, ArticleFetcher, R>
where
    St: RecordStore,
    R: SentimentService,
{
    /// Create a pipeline without link following
    pub fn new(store: St, scorer: Arc<SentimentScorer<R>>, config: PipelineConfig) -> Self {
        Self {
            store,
            scorer,
            links: None,
            config,
            metrics: PipelineMetrics::new(),
        }
    }
}

impl<St, L, R> PostPipeline<St, L, R>
where
    St: RecordStore,
    L: LinkContentSource,
    R: SentimentService,
{
    /// Attach a link resolver, used when `follow_links` is enabled
    pub fn with_links<L2: LinkContentSource>(self, resolver: LinkSentimentResolver<L2, R>) -> PostPipeline<St, L2, R> {
        PostPipeline {
            store: self.store,
            scorer: self.scorer,
            links: Some(resolver),
            config: self.config,
            metrics: self.metrics,
        }
    }

    /// Current metrics
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Reset the metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Decode a raw payload and process it
    ///
    /// # Errors
    ///
    /// Malformed payloads are logged, counted and returned as
    /// [`PipelineError::Decode`]; the caller should drop them and continue.
    pub async fn process_payload(&mut self, payload: &str, policy: &FilterPolicy) -> Result<PostOutcome, PipelineError> {
        match decode_post(payload) {
            Ok(post) => Ok(self.process(&post, policy).await),
            Err(e) => {
                self.metrics.processed += 1;
                self.metrics.protocol_errors += 1;
                error!("Dropping malformed payload: {}", e);
                Err(e)
            }
        }
    }

    /// Process one post to a terminal outcome
    pub async fn process(&mut self, post: &RawPost, policy: &FilterPolicy) -> PostOutcome {
        self.metrics.processed += 1;
        debug!("Processing post {}", post.id);

        let cleaned = clean(post.text());
        if cleaned.is_empty() {
            debug!("Post {} has no usable text, skipping", post.id);
            return self.reject(ContentRejection::TextEmpty);
        }

        let tokens = tokenize(&cleaned);
        if tokens.is_empty() {
            debug!("Post {} has no filter tokens, skipping", post.id);
            return self.reject(ContentRejection::TokensEmpty);
        }

        if let FilterDecision::Rejected(reason) = evaluate(&tokens, policy) {
            debug!("Post {} rejected by token policy: {:?}", post.id, reason);
            return self.reject(ContentRejection::Policy(reason));
        }

        let sentiment_text = strip_hashtags_and_mentions(&cleaned);
        let mut verdict = self.scorer.score(&sentiment_text, self.config.use_remote_sentiment).await;

        if self.config.follow_links && !post.urls.is_empty() {
            if let Some(resolver) = &self.links {
                verdict = resolver.apply(verdict, &post.urls, policy).await;
            }
        }

        let record = NormalizedRecord::from_post(post, cleaned, verdict);
        self.emit(record).await
    }

    fn reject(&mut self, rejection: ContentRejection) -> PostOutcome {
        self.metrics.filtered += 1;
        match &rejection {
            ContentRejection::TextEmpty => self.metrics.empty_text += 1,
            ContentRejection::TokensEmpty => self.metrics.empty_tokens += 1,
            ContentRejection::Policy(_) => self.metrics.policy_rejections += 1,
        }
        PostOutcome::Rejected(rejection)
    }

    async fn emit(&mut self, record: NormalizedRecord) -> PostOutcome {
        let write = timeout(self.config.store_timeout(), self.store.index_post(&record)).await;
        match write {
            Ok(Ok(())) => {
                self.metrics.emitted += 1;
                info!(
                    "Stored post {} by {} ({}, polarity {:.3})",
                    record.tweet_id, record.author, record.sentiment, record.polarity
                );
                PostOutcome::Emitted(record)
            }
            Ok(Err(e)) => {
                self.metrics.write_failures += 1;
                warn!("Failed to store post {}: {}", record.tweet_id, e);
                PostOutcome::WriteFailed(record)
            }
            Err(_) => {
                self.metrics.write_failures += 1;
                warn!("Timed out storing post {}", record.tweet_id);
                PostOutcome::WriteFailed(record)
            }
        }
    }
}
