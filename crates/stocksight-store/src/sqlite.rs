//! SQLite-backed record store

use crate::StoreError;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;
use stocksight_domain::traits::RecordStore;
use stocksight_domain::{Label, NormalizedRecord, StockQuote};

/// SQLite implementation of [`RecordStore`]
///
/// Keeps posts and quotes in two local tables, for runs without an
/// analytics cluster.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each task should own its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```
    /// use stocksight_store::SqliteStore;
    ///
    /// let store = SqliteStore::new(":memory:").unwrap();
    /// assert_eq!(store.count_posts().unwrap(), 0);
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Insert a post record
    pub fn insert_post(&self, record: &NormalizedRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO posts (tweet_id, author, location, language, friends, followers, statuses,
                                date, message, polarity, subjectivity, sentiment, hashtags)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                record.tweet_id as i64,
                &record.author,
                &record.location,
                &record.language,
                record.friends as i64,
                record.followers as i64,
                record.statuses as i64,
                &record.date,
                &record.message,
                record.polarity,
                record.subjectivity,
                record.sentiment.as_str(),
                &record.hashtags,
            ],
        )?;
        Ok(())
    }

    /// Insert a price snapshot
    pub fn insert_quote(&self, quote: &StockQuote) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO quotes (symbol, price_last, date, change, price_high, price_low, vol)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &quote.symbol,
                quote.last,
                &quote.date,
                quote.change,
                quote.high,
                quote.low,
                quote.vol,
            ],
        )?;
        Ok(())
    }

    /// Number of stored posts
    pub fn count_posts(&self) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Number of stored quotes
    pub fn count_quotes(&self) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM quotes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Most recently inserted posts, newest first
    pub fn recent_posts(&self, limit: usize) -> Result<Vec<NormalizedRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT tweet_id, author, location, language, friends, followers, statuses,
                    date, message, polarity, subjectivity, sentiment, hashtags
             FROM posts ORDER BY rowid DESC LIMIT ?1",
        )?;

        let records = stmt
            .query_map(params![limit as i64], |row| {
                let sentiment: String = row.get(11)?;
                let sentiment = Label::parse(&sentiment).ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(
                        11,
                        rusqlite::types::Type::Text,
                        Box::new(StoreError::InvalidData(format!("Unknown sentiment label: {}", sentiment))),
                    )
                })?;

                Ok(NormalizedRecord {
                    tweet_id: row.get::<_, i64>(0)? as u64,
                    author: row.get(1)?,
                    location: row.get(2)?,
                    language: row.get(3)?,
                    friends: row.get::<_, i64>(4)? as u64,
                    followers: row.get::<_, i64>(5)? as u64,
                    statuses: row.get::<_, i64>(6)? as u64,
                    date: row.get(7)?,
                    message: row.get(8)?,
                    polarity: row.get(9)?,
                    subjectivity: row.get(10)?,
                    sentiment,
                    hashtags: row.get(12)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Most recent quotes for a symbol, newest first
    pub fn recent_quotes(&self, symbol: &str, limit: usize) -> Result<Vec<StockQuote>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT symbol, price_last, date, change, price_high, price_low, vol
             FROM quotes WHERE symbol = ?1 ORDER BY rowid DESC LIMIT ?2",
        )?;

        let quotes = stmt
            .query_map(params![symbol, limit as i64], |row| {
                Ok(StockQuote {
                    symbol: row.get(0)?,
                    last: row.get(1)?,
                    date: row.get(2)?,
                    change: row.get(3)?,
                    high: row.get(4)?,
                    low: row.get(5)?,
                    vol: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(quotes)
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    type Error = StoreError;

    async fn index_post(&mut self, record: &NormalizedRecord) -> Result<(), Self::Error> {
        self.insert_post(record)
    }

    async fn index_quote(&mut self, quote: &StockQuote) -> Result<(), Self::Error> {
        self.insert_quote(quote)
    }
}
