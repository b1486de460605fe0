//! Stocksight Gatekeeper
//!
//! Decides whether a post is relevant before any sentiment work is spent on it.
//!
//! The Gatekeeper provides:
//! - Text normalization (links, markup, retweet and ellipsis markers)
//! - Tokenization into a stop-word-filtered [`TokenSet`]
//! - Ignore/require token policy evaluation
//!
//! # Examples
//!
//! ```
//! use stocksight_gatekeeper::{clean, tokenize, passes, FilterPolicy};
//!
//! let policy = FilterPolicy::new(vec!["blue origin".into()], vec!["giveaway".into()], 1);
//! let cleaned = clean("RT Blue Origin launch today! https://example.com");
//! assert_eq!(cleaned, "Blue Origin launch today!");
//!
//! let tokens = tokenize(&cleaned);
//! assert!(passes(&tokens, &policy));
//! ```
//!
//! [`TokenSet`]: stocksight_domain::TokenSet

#![warn(missing_docs)]

mod config;
mod error;
mod normalize;
mod stopwords;
mod tokenize;
mod validator;

pub use config::FilterPolicy;
pub use error::GatekeeperError;
pub use normalize::{clean, extract_urls, strip_hashtags_and_mentions};
pub use stopwords::is_stop_word;
pub use tokenize::{tokenize, MIN_TOKEN_LEN};
pub use validator::{evaluate, passes, FilterDecision, RejectionReason};
