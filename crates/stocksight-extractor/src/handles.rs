//! Author handle discovery from web pages

use scraper::{Html, Selector};
use url::Url;

/// Hosts serving social-platform profile pages
pub const PROFILE_HOSTS: &[&str] = &[
    "twitter.com",
    "www.twitter.com",
    "mobile.twitter.com",
    "x.com",
    "www.x.com",
];

// First path segments that are site sections rather than profiles
const RESERVED_PATHS: &[&str] = &["intent", "share", "home", "search", "hashtag", "i", "login", "signup"];

/// Collect `@handle` values from profile links in an HTML document
///
/// Links carrying a query (`?` or `=` anywhere in the href) are skipped.
/// Relative links are resolved against `base` when given. Handles are
/// returned in document order without duplicates.
pub fn profile_handles(html: &str, base: Option<&Url>) -> Vec<String> {
    let doc = Html::parse_document(html);
    let Ok(sel) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut handles: Vec<String> = Vec::new();
    for href in doc.select(&sel).filter_map(|el| el.value().attr("href")) {
        if let Some(handle) = handle_from_link(href, base) {
            if !handles.contains(&handle) {
                handles.push(handle);
            }
        }
    }
    handles
}

/// Extract the `@handle` a single profile link points to
pub fn handle_from_link(href: &str, base: Option<&Url>) -> Option<String> {
    if href.contains('?') || href.contains('=') {
        return None;
    }

    let url = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    let host = url.host_str()?.to_ascii_lowercase();
    if !PROFILE_HOSTS.contains(&host.as_str()) {
        return None;
    }

    let user = url.path_segments()?.next()?;
    if user.is_empty() || RESERVED_PATHS.contains(&user.to_ascii_lowercase().as_str()) {
        return None;
    }
    Some(format!("@{}", user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_links() {
        let html = r#"<html><body>
            <a href="https://twitter.com/JeffBezos">Jeff</a>
            <a href="http://www.twitter.com/amazon/status/1">status</a>
            <a href="https://twitter.com/intent/tweet?text=hi">share</a>
            <a href="https://twitter.com/search?q=amzn">search</a>
            <a href="https://example.com/JeffBezos">elsewhere</a>
            <a href="https://twitter.com/JeffBezos">again</a>
            <a href="https://twitter.com/">root</a>
        </body></html>"#;

        assert_eq!(profile_handles(html, None), vec!["@JeffBezos", "@amazon"]);
    }

    #[test]
    fn test_relative_links_use_base() {
        let base = Url::parse("https://twitter.com/lists").unwrap();
        let html = r#"<a href="/blueorigin">Blue</a><a href="/home">home</a>"#;
        assert_eq!(profile_handles(html, Some(&base)), vec!["@blueorigin"]);
    }

    #[test]
    fn test_relative_links_without_base_skipped() {
        assert_eq!(handle_from_link("/blueorigin", None), None);
    }

    #[test]
    fn test_query_links_rejected() {
        assert_eq!(handle_from_link("https://twitter.com/amazon?lang=en", None), None);
        assert_eq!(handle_from_link("https://x.com/amazon", None), Some("@amazon".to_string()));
    }

    #[test]
    fn test_no_links() {
        assert!(profile_handles("<p>no links here</p>", None).is_empty());
    }
}
