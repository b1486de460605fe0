//! Elasticsearch document store over its REST API

use crate::StoreError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use stocksight_domain::traits::RecordStore;
use stocksight_domain::{NormalizedRecord, StockQuote};
use tracing::{debug, info};

/// Default cluster URL
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// Default index for post records
pub const DEFAULT_POST_INDEX: &str = "stock-tweet";

/// Default index for price snapshots
pub const DEFAULT_QUOTE_INDEX: &str = "stock-price";

/// Elasticsearch implementation of [`RecordStore`]
///
/// Every document goes to one index via `POST /{index}/_doc`.
pub struct ElasticsearchStore {
    client: reqwest::Client,
    base_url: String,
    index: String,
}

impl ElasticsearchStore {
    /// Create a store writing to `index` on the cluster at `base_url`
    pub fn new(base_url: impl Into<String>, index: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let index = index.into();
        if index.is_empty() || index.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace() || c == '/') {
            return Err(StoreError::InvalidData(format!("Invalid index name: '{}'", index)));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            index,
        })
    }

    /// Target index
    pub fn index(&self) -> &str {
        &self.index
    }

    fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index)
    }

    /// Create the index with `mapping` unless it already exists
    ///
    /// Returns `true` when the index was created.
    pub async fn ensure_index(&self, mapping: &Value) -> Result<bool, StoreError> {
        let url = self.index_url();
        let exists = self.client.head(&url).send().await?;
        if exists.status().is_success() {
            debug!("Index {} already exists", self.index);
            return Ok(false);
        }

        let response = self.client.put(&url).json(mapping).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Another writer may have created it between the two calls
            if body.contains("resource_already_exists_exception") {
                return Ok(false);
            }
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("Created index {}", self.index);
        Ok(true)
    }

    async fn post_document<T: Serialize + Sync>(&self, document: &T) -> Result<(), StoreError> {
        let response = self
            .client
            .post(format!("{}/_doc", self.index_url()))
            .json(document)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        debug!("Indexed document into {} ({})", self.index, status);
        Ok(())
    }
}

#[async_trait]
impl RecordStore for ElasticsearchStore {
    type Error = StoreError;

    async fn index_post(&mut self, record: &NormalizedRecord) -> Result<(), Self::Error> {
        self.post_document(record).await
    }

    async fn index_quote(&mut self, quote: &StockQuote) -> Result<(), Self::Error> {
        self.post_document(quote).await
    }
}

/// Index mapping for post records
pub fn post_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "author": { "type": "keyword" },
                "location": { "type": "text" },
                "language": { "type": "keyword" },
                "friends": { "type": "long" },
                "followers": { "type": "long" },
                "statuses": { "type": "long" },
                "date": { "type": "date", "format": "strict_date_hour_minute_second" },
                "message": { "type": "text" },
                "tweet_id": { "type": "long" },
                "polarity": { "type": "float" },
                "subjectivity": { "type": "float" },
                "sentiment": { "type": "keyword" },
                "hashtags": { "type": "keyword" }
            }
        }
    })
}

/// Index mapping for price snapshots
pub fn quote_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "symbol": { "type": "keyword" },
                "price_last": { "type": "float" },
                "date": { "type": "date", "format": "strict_date_hour_minute_second" },
                "change": { "type": "float" },
                "price_high": { "type": "float" },
                "price_low": { "type": "float" },
                "vol": { "type": "double" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_index_names() {
        for name in ["", "Stock-Tweet", "stock tweet", "a/b"] {
            assert!(ElasticsearchStore::new(DEFAULT_URL, name, Duration::from_secs(1)).is_err());
        }
    }

    #[test]
    fn test_index_url() {
        let store = ElasticsearchStore::new("http://es:9200/", DEFAULT_POST_INDEX, Duration::from_secs(1)).unwrap();
        assert_eq!(store.index_url(), "http://es:9200/stock-tweet");
        assert_eq!(store.index(), "stock-tweet");
    }

    #[test]
    fn test_mappings_cover_document_fields() {
        let record = serde_json::to_value(NormalizedRecord {
            author: "a".into(),
            location: String::new(),
            language: "en".into(),
            friends: 1,
            followers: 2,
            statuses: 3,
            date: "2018-10-10T20:19:24".into(),
            message: "m".into(),
            tweet_id: 9,
            polarity: 0.1,
            subjectivity: 0.2,
            sentiment: stocksight_domain::Label::Neutral,
            hashtags: String::new(),
        })
        .unwrap();

        let mapping = post_mapping();
        let properties = mapping["mappings"]["properties"].as_object().unwrap();
        for key in record.as_object().unwrap().keys() {
            assert!(properties.contains_key(key), "mapping missing {}", key);
        }
        assert!(quote_mapping()["mappings"]["properties"]["price_last"].is_object());
    }

    #[tokio::test]
    async fn test_unreachable_cluster() {
        let mut store = ElasticsearchStore::new("http://127.0.0.1:9", "stock-price", Duration::from_secs(2)).unwrap();
        let quote = StockQuote {
            symbol: "AMZN".into(),
            last: 1.0,
            date: "2020-01-01T00:00:00".into(),
            change: None,
            high: 1.0,
            low: 1.0,
            vol: None,
        };
        assert!(matches!(store.index_quote(&quote).await, Err(StoreError::Http(_))));
    }
}
