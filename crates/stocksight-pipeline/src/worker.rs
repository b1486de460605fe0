//! Stream worker driving the pipeline until end of stream or Ctrl+C

use crate::{PipelineError, PipelineMetrics, PostPipeline};
use stocksight_domain::traits::{LinkContentSource, PostSource, RecordStore, SentimentService};
use stocksight_gatekeeper::FilterPolicy;

type ProgressHook = Box<dyn FnMut(&PipelineMetrics) + Send>;

/// Pulls payloads from a [`PostSource`] and runs each through the pipeline
///
/// One payload is processed to completion before the next is pulled.
/// Malformed payloads are dropped; a source failure stops the worker.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use stocksight_gatekeeper::FilterPolicy;
/// use stocksight_pipeline::{JsonLinesSource, PipelineConfig, PostPipeline, StreamWorker};
/// use stocksight_sentiment::SentimentScorer;
/// use stocksight_store::MemoryStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pipeline = PostPipeline::new(MemoryStore::new(), Arc::new(SentimentScorer::local()), PipelineConfig::default());
///     let mut worker = StreamWorker::new(pipeline, FilterPolicy::default());
///
///     // Run until end of input (or Ctrl+C)
///     worker.run(JsonLinesSource::stdin()).await?;
///     Ok(())
/// }
/// ```
pub struct StreamWorker<St, L, R> {
    pipeline: PostPipeline<St, L, R>,
    policy: FilterPolicy,
    progress: Option<ProgressHook>,
}

impl<St, L, R> StreamWorker<St, L, R>
where
    St: RecordStore,
    L: LinkContentSource,
    R: SentimentService,
{
    /// Create a worker over a pipeline and a read-only policy
    pub fn new(pipeline: PostPipeline<St, L, R>, policy: FilterPolicy) -> Self {
        Self {
            pipeline,
            policy,
            progress: None,
        }
    }

    /// Call `hook` with the metrics after every payload
    pub fn with_progress(mut self, hook: impl FnMut(&PipelineMetrics) + Send + 'static) -> Self {
        self.progress = Some(Box::new(hook));
        self
    }

    /// Filter policy in use
    pub fn policy(&self) -> &FilterPolicy {
        &self.policy
    }

    /// Current metrics
    pub fn metrics(&self) -> &PipelineMetrics {
        self.pipeline.metrics()
    }

    /// Run until the stream ends or a shutdown signal (Ctrl+C) is received
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Source`] when the stream source fails.
    pub async fn run<S: PostSource>(&mut self, mut source: S) -> Result<PipelineMetrics, PipelineError> {
        tracing::info!("Stream worker started");

        loop {
            tokio::select! {
                next = source.next_payload() => {
                    match next {
                        Ok(Some(payload)) => self.handle(&payload).await,
                        Ok(None) => {
                            tracing::info!("End of stream");
                            break;
                        }
                        Err(e) => {
                            tracing::error!("Stream source failed: {}", e);
                            tracing::info!("Stream worker stopped. Final metrics:\n{}", self.metrics().summary());
                            return Err(PipelineError::Source(e.to_string()));
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping stream worker");
                    break;
                }
            }
        }

        let metrics = self.metrics().clone();
        tracing::info!("Stream worker stopped. Final metrics:\n{}", metrics.summary());
        Ok(metrics)
    }

    async fn handle(&mut self, payload: &str) {
        // Decode errors are already logged and counted by the pipeline
        let _ = self.pipeline.process_payload(payload, &self.policy).await;

        let metrics = self.pipeline.metrics();
        if let Some(hook) = self.progress.as_mut() {
            hook(metrics);
        }
        let every = self.pipeline.config().summary_every;
        if every > 0 && metrics.processed % every == 0 {
            tracing::info!("{}", metrics.progress_line());
        }
    }
}
