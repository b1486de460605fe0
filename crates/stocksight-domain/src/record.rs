//! Record module - the normalized document written to the store

use crate::{Label, RawPost, SentimentVerdict};
use serde::{Deserialize, Serialize};

/// Normalized post record
///
/// Created once per accepted post and handed to the store. Field names
/// match the document shape the analytics index expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Author handle
    pub author: String,

    /// Author location (empty when unknown)
    pub location: String,

    /// Author language (empty when unknown)
    pub language: String,

    /// Accounts the author follows
    pub friends: u64,

    /// Accounts following the author
    pub followers: u64,

    /// Posts the author has published
    pub statuses: u64,

    /// Creation date, ISO-8601
    pub date: String,

    /// Cleaned message text
    pub message: String,

    /// Post identifier
    pub tweet_id: u64,

    /// Merged polarity
    pub polarity: f64,

    /// Merged subjectivity
    pub subjectivity: f64,

    /// Merged label
    pub sentiment: Label,

    /// Primary hashtag (empty when absent)
    pub hashtags: String,
}

impl NormalizedRecord {
    /// Build a record from post metadata, its cleaned text and the merged verdict
    pub fn from_post(post: &RawPost, message: impl Into<String>, verdict: SentimentVerdict) -> Self {
        Self {
            author: post.author.handle.clone(),
            location: post.author.location.clone().unwrap_or_default(),
            language: post.author.language.clone().unwrap_or_default(),
            friends: post.author.friends,
            followers: post.author.followers,
            statuses: post.author.statuses,
            date: post.created_at.clone(),
            message: message.into(),
            tweet_id: post.id,
            polarity: verdict.polarity,
            subjectivity: verdict.subjectivity,
            sentiment: verdict.label,
            hashtags: post.primary_hashtag.clone().unwrap_or_default(),
        }
    }

    /// The verdict fields of the record
    pub fn verdict(&self) -> SentimentVerdict {
        SentimentVerdict::new(self.polarity, self.subjectivity, self.sentiment)
    }
}
