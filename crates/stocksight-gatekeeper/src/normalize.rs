//! Text normalization for raw post text

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static ENTITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&#?[A-Za-z0-9]+;").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static RETWEET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bRT\b:?").unwrap());
static ELLIPSIS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{3,}|…").unwrap());
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Clean raw post text
///
/// Removes embedded links, HTML entity escapes, HTML tags, retweet markers
/// and ellipsis markers, replaces newlines with spaces, folds whitespace and
/// trims. An empty result means the post carries no content.
pub fn clean(text: &str) -> String {
    let text = URL_RE.replace_all(text, " ");
    let text = ENTITY_RE.replace_all(&text, "");
    let text = TAG_RE.replace_all(&text, " ");
    let text = RETWEET_RE.replace_all(&text, " ");
    let text = ELLIPSIS_RE.replace_all(&text, " ");
    fold_whitespace(&text)
}

/// Remove hashtags and mentions
///
/// Hashtags and mentions help relevance filtering but distort lexicon
/// scoring, so they are dropped before sentiment analysis.
pub fn strip_hashtags_and_mentions(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| !word.starts_with('#') && !word.starts_with('@'))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Links embedded in raw text, in order of appearance, without duplicates
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for m in URL_RE.find_iter(text) {
        let url = m.as_str().to_string();
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

fn fold_whitespace(text: &str) -> String {
    WS_RE.replace_all(text.trim(), " ").into_owned()
}
