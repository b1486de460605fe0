//! In-memory record store

use crate::StoreError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use stocksight_domain::traits::RecordStore;
use stocksight_domain::{NormalizedRecord, StockQuote};

/// In-memory implementation of [`RecordStore`]
///
/// Clones share the same storage, so a test can keep a handle while the
/// pipeline owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    posts: Arc<Mutex<Vec<NormalizedRecord>>>,
    quotes: Arc<Mutex<Vec<StockQuote>>>,
    failing: Arc<Mutex<bool>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Stored post records, in write order
    pub fn posts(&self) -> Vec<NormalizedRecord> {
        self.posts.lock().unwrap().clone()
    }

    /// Stored quotes, in write order
    pub fn quotes(&self) -> Vec<StockQuote> {
        self.quotes.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if *self.failing.lock().unwrap() {
            return Err(StoreError::Unavailable("memory store is failing".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    type Error = StoreError;

    async fn index_post(&mut self, record: &NormalizedRecord) -> Result<(), Self::Error> {
        self.check_available()?;
        self.posts.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn index_quote(&mut self, quote: &StockQuote) -> Result<(), Self::Error> {
        self.check_available()?;
        self.quotes.lock().unwrap().push(quote.clone());
        Ok(())
    }
}
