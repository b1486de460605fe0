//! Integration tests for stocksight-store
//!
//! These tests write records and quotes through the `RecordStore` trait and
//! read them back.

use stocksight_domain::traits::RecordStore;
use stocksight_domain::{Label, NormalizedRecord, StockQuote};
use stocksight_store::{ConfiguredStore, DocumentKind, MemoryStore, SqliteStore, StoreBackend, StoreConfig, StoreError};
use tempfile::TempDir;

fn record(tweet_id: u64, sentiment: Label) -> NormalizedRecord {
    NormalizedRecord {
        author: "JeffBezos".to_string(),
        location: "Seattle".to_string(),
        language: "en".to_string(),
        friends: 10,
        followers: 2_000_000,
        statuses: 300,
        date: "2018-10-10T20:19:24".to_string(),
        message: "Blue Origin launch today".to_string(),
        tweet_id,
        polarity: 0.25,
        subjectivity: 0.5,
        sentiment,
        hashtags: "Blueorigin".to_string(),
    }
}

fn quote(last: f64) -> StockQuote {
    StockQuote {
        symbol: "AMZN".to_string(),
        last,
        date: "2020-01-02T15:30:00".to_string(),
        change: Some(0.5),
        high: last + 1.0,
        low: last - 1.0,
        vol: None,
    }
}

#[tokio::test]
async fn test_sqlite_post_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut store = SqliteStore::new(dir.path().join("posts.db")).unwrap();

    store.index_post(&record(1, Label::Positive)).await.unwrap();
    store.index_post(&record(2, Label::Negative)).await.unwrap();

    assert_eq!(store.count_posts().unwrap(), 2);
    let recent = store.recent_posts(1).unwrap();
    assert_eq!(recent, vec![record(2, Label::Negative)]);
}

#[tokio::test]
async fn test_sqlite_quotes_by_symbol() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.index_quote(&quote(100.0)).await.unwrap();
    store.index_quote(&quote(101.0)).await.unwrap();

    assert_eq!(store.count_quotes().unwrap(), 2);
    let recent = store.recent_quotes("AMZN", 10).unwrap();
    assert_eq!(recent[0].last, 101.0);
    assert_eq!(recent[1], quote(100.0));
    assert!(store.recent_quotes("TSLA", 10).unwrap().is_empty());
}

#[tokio::test]
async fn test_sqlite_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("persist.db");
    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.index_post(&record(7, Label::Neutral)).await.unwrap();
    }
    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.count_posts().unwrap(), 1);
}

#[tokio::test]
async fn test_memory_store_shared_between_clones() {
    let store = MemoryStore::new();
    let mut writer = store.clone();

    writer.index_post(&record(1, Label::Positive)).await.unwrap();
    writer.index_quote(&quote(10.0)).await.unwrap();

    assert_eq!(store.posts().len(), 1);
    assert_eq!(store.quotes().len(), 1);
}

#[tokio::test]
async fn test_memory_store_failing_writes() {
    let store = MemoryStore::new();
    let mut writer = store.clone();
    store.set_failing(true);

    let result = writer.index_post(&record(1, Label::Positive)).await;
    assert!(matches!(result, Err(StoreError::Unavailable(_))));
    assert!(store.posts().is_empty());

    store.set_failing(false);
    writer.index_post(&record(1, Label::Positive)).await.unwrap();
    assert_eq!(store.posts().len(), 1);
}

#[tokio::test]
async fn test_configured_sqlite_store() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        backend: StoreBackend::Sqlite,
        sqlite_path: dir.path().join("configured.db"),
        ..StoreConfig::default()
    };

    let mut store = ConfiguredStore::open(&config, "stock-tweet", DocumentKind::Posts).await.unwrap();
    store.index_post(&record(3, Label::Positive)).await.unwrap();

    let check = SqliteStore::new(dir.path().join("configured.db")).unwrap();
    assert_eq!(check.count_posts().unwrap(), 1);
}

#[tokio::test]
async fn test_configured_store_validates() {
    let config = StoreConfig {
        timeout_secs: 0,
        ..StoreConfig::default()
    };
    let result = ConfiguredStore::open(&config, "stock-tweet", DocumentKind::Posts).await;
    assert!(matches!(result, Err(StoreError::Config(_))));
}
