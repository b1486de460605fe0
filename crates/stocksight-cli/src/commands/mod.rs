//! Command implementations.

pub mod price;
pub mod tweets;

pub use self::price::execute_price;
pub use self::tweets::{execute_tweets, track_keywords};
