//! End-to-end scenarios: payload in, record (or nothing) out

use std::sync::Arc;
use stocksight_domain::{Label, RawPost};
use stocksight_extractor::{ArticleFetcher, LinkConfig, LinkSentimentResolver, MockLinkSource};
use stocksight_gatekeeper::{FilterPolicy, RejectionReason};
use stocksight_pipeline::{ContentRejection, PipelineConfig, PostOutcome, PostPipeline};
use stocksight_domain::traits::PageContent;
use stocksight_sentiment::{MockClassifier, RemoteClassifier, SentimentScorer};
use stocksight_store::MemoryStore;

fn local_pipeline(store: &MemoryStore) -> PostPipeline<MemoryStore, ArticleFetcher, RemoteClassifier> {
    PostPipeline::new(store.clone(), Arc::new(SentimentScorer::local()), PipelineConfig::default())
}

fn bezos_policy() -> FilterPolicy {
    FilterPolicy::new(vec!["jeff bezos".into(), "blue origin".into()], vec![], 1)
}

#[tokio::test]
async fn test_bezos_announcement_is_emitted() {
    let store = MemoryStore::new();
    let mut pipeline = local_pipeline(&store);

    let payload = r#"{
        "id": 1050118621198921728,
        "text": "Jeff Bezos announces new Blue Origin launch! https://example.com",
        "created_at": "Wed Oct 10 20:19:24 +0000 2018",
        "user": {"screen_name": "spacefan", "lang": "en", "followers_count": 340},
        "entities": {"hashtags": [{"text": "blueorigin"}]}
    }"#
    .replace('\n', " ");

    let outcome = pipeline.process_payload(&payload, &bezos_policy()).await.unwrap();
    assert!(outcome.is_emitted());

    let posts = store.posts();
    assert_eq!(posts.len(), 1);
    let record = &posts[0];
    assert_eq!(record.tweet_id, 1050118621198921728);
    assert_eq!(record.author, "spacefan");
    assert_eq!(record.date, "2018-10-10T20:19:24");
    assert_eq!(record.message, "Jeff Bezos announces new Blue Origin launch!");
    assert_eq!(record.hashtags, "Blueorigin");
    assert_eq!(record.location, "");
    assert_eq!(record.language, "en");
}

#[tokio::test]
async fn test_giveaway_is_rejected_and_nothing_stored() {
    let store = MemoryStore::new();
    let mut pipeline = local_pipeline(&store);
    let policy = FilterPolicy::new(vec!["phone".into()], vec!["giveaway".into(), "win".into()], 1);

    let post = RawPost::new(2, "giveaway alert! win a free phone", "2018-10-10T20:19:24");
    let outcome = pipeline.process(&post, &policy).await;

    assert_eq!(
        outcome,
        PostOutcome::Rejected(ContentRejection::Policy(RejectionReason::IgnoredToken("giveaway".to_string())))
    );
    assert!(store.posts().is_empty());
    assert_eq!(pipeline.metrics().filtered, 1);
    assert_eq!(pipeline.metrics().policy_rejections, 1);
}

#[tokio::test]
async fn test_empty_text_is_rejected() {
    let store = MemoryStore::new();
    let mut pipeline = local_pipeline(&store);

    let payload = r#"{"id": 3, "text": "", "created_at": "Wed Oct 10 20:19:24 +0000 2018", "user": {}}"#;
    let outcome = pipeline.process_payload(payload, &FilterPolicy::default()).await.unwrap();
    assert_eq!(outcome, PostOutcome::Rejected(ContentRejection::TextEmpty));

    let payload = r#"{"id": 4, "created_at": "Wed Oct 10 20:19:24 +0000 2018", "user": {}}"#;
    let outcome = pipeline.process_payload(payload, &FilterPolicy::default()).await.unwrap();
    assert_eq!(outcome, PostOutcome::Rejected(ContentRejection::TextEmpty));

    assert!(store.posts().is_empty());
    assert_eq!(pipeline.metrics().empty_text, 2);
}

#[tokio::test]
async fn test_insufficient_required_tokens() {
    let store = MemoryStore::new();
    let mut pipeline = local_pipeline(&store);
    let policy = FilterPolicy::new(vec!["amazon".into(), "bezos".into()], vec![], 2);

    let post = RawPost::new(5, "amazon earnings beat expectations", "2018-10-10T20:19:24");
    let outcome = pipeline.process(&post, &policy).await;

    assert_eq!(
        outcome,
        PostOutcome::Rejected(ContentRejection::Policy(RejectionReason::InsufficientRequired {
            found: 1,
            required: 2
        }))
    );
}

#[tokio::test]
async fn test_remote_disagreement_makes_neutral() {
    let store = MemoryStore::new();
    let scorer = Arc::new(SentimentScorer::with_remote(MockClassifier::new(Label::Negative)));
    let config = PipelineConfig {
        use_remote_sentiment: true,
        ..Default::default()
    };
    let mut pipeline = PostPipeline::new(store.clone(), scorer, config);

    let post = RawPost::new(6, "Amazon reports great results", "2018-10-10T20:19:24");
    pipeline.process(&post, &FilterPolicy::default()).await;

    assert_eq!(store.posts()[0].sentiment, Label::Neutral);
}

#[tokio::test]
async fn test_permalink_pages_do_not_change_the_verdict() {
    let store = MemoryStore::new();
    let mut source = MockLinkSource::new();
    source.add_page(
        "https://twitter.com/someone/status/1",
        PageContent {
            text: "Tweet with a location. Amazon is terrible".into(),
            summary: "Amazon is terrible".into(),
            keywords: vec!["amazon".into()],
        },
    );
    let scorer = Arc::new(SentimentScorer::local());
    let resolver = LinkSentimentResolver::new(source, scorer.clone(), LinkConfig::default());
    let config = PipelineConfig {
        follow_links: true,
        ..Default::default()
    };
    let mut pipeline = PostPipeline::new(store.clone(), scorer, config).with_links(resolver);

    let text = "Amazon shipping update https://twitter.com/someone/status/1";
    let post = RawPost::new(7, text, "2018-10-10T20:19:24")
        .with_urls(vec!["https://twitter.com/someone/status/1".to_string()]);
    pipeline.process(&post, &FilterPolicy::default()).await;

    let record = &store.posts()[0];
    assert_eq!(record.sentiment, Label::Neutral);
    assert_eq!(record.polarity, 0.0);
}
