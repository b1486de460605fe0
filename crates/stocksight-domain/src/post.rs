//! Post module - the raw input unit delivered by the inbound stream

/// Author metadata carried with every post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostAuthor {
    /// Author handle (screen name, without the leading `@`)
    pub handle: String,

    /// Free-form profile location
    pub location: Option<String>,

    /// Profile language code
    pub language: Option<String>,

    /// Number of accounts the author follows
    pub friends: u64,

    /// Number of accounts following the author
    pub followers: u64,

    /// Number of posts the author has published
    pub statuses: u64,
}

/// A post as received from the stream
///
/// Immutable once received: the pipeline only reads from it and derives
/// new values (cleaned text, tokens, verdicts, records).
///
/// # Examples
///
/// ```
/// use stocksight_domain::RawPost;
///
/// let post = RawPost::new(42, "Blue Origin launch today", "2018-10-10T20:19:24");
/// assert_eq!(post.id, 42);
/// assert!(post.urls.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPost {
    /// Unique numeric identifier
    pub id: u64,

    /// Post text; absent for some stream messages
    pub text: Option<String>,

    /// Creation timestamp, ISO-8601 (`%Y-%m-%dT%H:%M:%S`, UTC)
    pub created_at: String,

    /// Author metadata
    pub author: PostAuthor,

    /// First hashtag of the post, title-cased
    pub primary_hashtag: Option<String>,

    /// Links embedded in the post text, in order of appearance
    pub urls: Vec<String>,
}

impl RawPost {
    /// Create a post with text and default author metadata
    pub fn new(id: u64, text: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id,
            text: Some(text.into()),
            created_at: created_at.into(),
            author: PostAuthor::default(),
            primary_hashtag: None,
            urls: Vec::new(),
        }
    }

    /// Set the author metadata
    pub fn with_author(mut self, author: PostAuthor) -> Self {
        self.author = author;
        self
    }

    /// Set the embedded links
    pub fn with_urls(mut self, urls: Vec<String>) -> Self {
        self.urls = urls;
        self
    }

    /// Set the primary hashtag
    pub fn with_hashtag(mut self, hashtag: impl Into<String>) -> Self {
        self.primary_hashtag = Some(hashtag.into());
        self
    }

    /// Text of the post, treating a missing field as empty
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
