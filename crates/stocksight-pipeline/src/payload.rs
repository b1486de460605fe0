//! Decoding of raw stream payloads into [`RawPost`]

use crate::PipelineError;
use chrono::DateTime;
use serde::Deserialize;
use stocksight_domain::{PostAuthor, RawPost};
use stocksight_gatekeeper::extract_urls;

/// Timestamp format used by the stream
pub const STREAM_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Timestamp format written to records
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Deserialize)]
struct TweetPayload {
    id: u64,
    #[serde(default, alias = "full_text")]
    text: Option<String>,
    created_at: String,
    user: UserPayload,
    #[serde(default)]
    entities: EntitiesPayload,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    #[serde(default)]
    screen_name: String,
    location: Option<String>,
    lang: Option<String>,
    #[serde(default)]
    friends_count: u64,
    #[serde(default)]
    followers_count: u64,
    #[serde(default)]
    statuses_count: u64,
}

#[derive(Debug, Default, Deserialize)]
struct EntitiesPayload {
    #[serde(default)]
    hashtags: Vec<HashtagPayload>,
}

#[derive(Debug, Deserialize)]
struct HashtagPayload {
    text: String,
}

/// Decode one stream payload
///
/// # Errors
///
/// Returns [`PipelineError::Decode`] for malformed JSON, a missing `id`,
/// `created_at` or `user`, or an unparseable date.
pub fn decode_post(payload: &str) -> Result<RawPost, PipelineError> {
    let tweet: TweetPayload = serde_json::from_str(payload)?;
    let created_at = parse_created_at(&tweet.created_at)?;

    let urls = tweet.text.as_deref().map(extract_urls).unwrap_or_default();
    let primary_hashtag = tweet.entities.hashtags.first().map(|tag| title_case(&tag.text));

    Ok(RawPost {
        id: tweet.id,
        text: tweet.text,
        created_at,
        author: PostAuthor {
            handle: tweet.user.screen_name,
            location: tweet.user.location,
            language: tweet.user.lang,
            friends: tweet.user.friends_count,
            followers: tweet.user.followers_count,
            statuses: tweet.user.statuses_count,
        },
        primary_hashtag,
        urls,
    })
}

/// Convert a stream timestamp into the record format, in UTC
pub fn parse_created_at(raw: &str) -> Result<String, PipelineError> {
    let parsed = DateTime::parse_from_str(raw, STREAM_DATE_FORMAT)
        .map_err(|e| PipelineError::Decode(format!("Bad created_at '{}': {}", raw, e)))?;
    Ok(parsed.naive_utc().format(RECORD_DATE_FORMAT).to_string())
}

/// Capitalize the first letter of every alphabetic run, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "id": 1050118621198921728,
        "text": "Jeff Bezos announces new Blue Origin launch! https://example.com/launch",
        "created_at": "Wed Oct 10 20:19:24 +0000 2018",
        "user": {
            "screen_name": "spacefan",
            "location": "Seattle, WA",
            "lang": "en",
            "friends_count": 12,
            "followers_count": 340,
            "statuses_count": 5600
        },
        "entities": { "hashtags": [{ "text": "blueOrigin" }, { "text": "amzn" }] }
    }"#;

    #[test]
    fn test_decode_full_payload() {
        let post = decode_post(PAYLOAD).unwrap();
        assert_eq!(post.id, 1050118621198921728);
        assert_eq!(post.created_at, "2018-10-10T20:19:24");
        assert_eq!(post.author.handle, "spacefan");
        assert_eq!(post.author.location.as_deref(), Some("Seattle, WA"));
        assert_eq!(post.author.followers, 340);
        assert_eq!(post.primary_hashtag.as_deref(), Some("Blueorigin"));
        assert_eq!(post.urls, vec!["https://example.com/launch"]);
    }

    #[test]
    fn test_decode_minimal_payload() {
        let post = decode_post(r#"{"id": 1, "created_at": "Wed Oct 10 20:19:24 +0000 2018", "user": {}}"#).unwrap();
        assert_eq!(post.text, None);
        assert!(post.urls.is_empty());
        assert_eq!(post.primary_hashtag, None);
        assert_eq!(post.author, PostAuthor::default());
    }

    #[test]
    fn test_missing_required_fields() {
        for payload in [
            r#"{"created_at": "Wed Oct 10 20:19:24 +0000 2018", "user": {}}"#,
            r#"{"id": 1, "user": {}}"#,
            r#"{"id": 1, "created_at": "Wed Oct 10 20:19:24 +0000 2018"}"#,
            "not json",
        ] {
            assert!(matches!(decode_post(payload), Err(PipelineError::Decode(_))), "{}", payload);
        }
    }

    #[test]
    fn test_bad_date() {
        let result = decode_post(r#"{"id": 1, "created_at": "2018-10-10", "user": {}}"#);
        assert!(matches!(result, Err(PipelineError::Decode(_))));
    }

    #[test]
    fn test_created_at_converted_to_utc() {
        assert_eq!(parse_created_at("Wed Oct 10 22:19:24 +0200 2018").unwrap(), "2018-10-10T20:19:24");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("blueOrigin"), "Blueorigin");
        assert_eq!(title_case("amazon_prime"), "Amazon_Prime");
        assert_eq!(title_case("2day"), "2Day");
        assert_eq!(title_case(""), "");
    }
}
