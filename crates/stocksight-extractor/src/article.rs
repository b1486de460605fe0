//! Page download and article extraction

use crate::handles::profile_handles;
use crate::{ExtractorError, LinkConfig};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use stocksight_domain::traits::{LinkContentSource, PageContent};
use stocksight_gatekeeper::tokenize;
use tracing::debug;

/// Extracted article: plaintext, summary and keywords
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Article {
    /// Document title, if any
    pub title: Option<String>,
    /// Readable body text
    pub text: String,
    /// Top-ranked sentences in document order
    pub summary: String,
    /// Most frequent content words, most frequent first
    pub keywords: Vec<String>,
}

impl From<Article> for PageContent {
    fn from(article: Article) -> Self {
        PageContent {
            text: article.text,
            summary: article.summary,
            keywords: article.keywords,
        }
    }
}

/// Parse an HTML document into an [`Article`]
pub fn parse_article(html: &str, summary_sentences: usize, max_keywords: usize) -> Article {
    let doc = Html::parse_document(html);

    let title = first_text(&doc, "title");
    let mut text = joined_text(&doc, "h1, h2, h3, p, li");
    if text.is_empty() {
        text = joined_text(&doc, "body");
    }

    let keywords = keywords(&text, max_keywords);
    let summary = summarize(&text, title.as_deref(), &keywords, summary_sentences);

    Article {
        title,
        text,
        summary,
        keywords,
    }
}

fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let el = doc.select(&sel).next()?;
    let text = norm_ws(&el.text().collect::<Vec<_>>().join(" "));
    (!text.is_empty()).then_some(text)
}

fn joined_text(doc: &Html, selector: &str) -> String {
    let Ok(sel) = Selector::parse(selector) else {
        return String::new();
    };
    doc.select(&sel)
        .map(|el| norm_ws(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn norm_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Most frequent content words of a text
///
/// Ties keep first-appearance order.
pub fn keywords(text: &str, max_keywords: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, token) in tokenize(text).iter().enumerate() {
        counts.entry(token.to_string()).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (ca, pa)), (_, (cb, pb))| cb.cmp(ca).then(pa.cmp(pb)));
    ranked.into_iter().take(max_keywords).map(|(word, _)| word).collect()
}

/// Split text into sentences on terminal punctuation and line breaks
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            push_sentence(&mut sentences, &mut current);
            continue;
        }
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().map_or(true, |next| next.is_whitespace()) {
            push_sentence(&mut sentences, &mut current);
        }
    }
    push_sentence(&mut sentences, &mut current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let sentence = norm_ws(current);
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
    current.clear();
}

/// Pick the `count` best sentences, returned in document order
///
/// A sentence scores by the keyword density of its tokens plus its overlap
/// with the title.
pub fn summarize(text: &str, title: Option<&str>, keywords: &[String], count: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() || count == 0 {
        return String::new();
    }

    let weight: HashMap<&str, f64> = keywords
        .iter()
        .enumerate()
        .map(|(rank, word)| (word.as_str(), 1.0 - rank as f64 / (keywords.len() as f64 + 1.0)))
        .collect();
    let title_tokens = title.map(tokenize).unwrap_or_default();

    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| {
            let tokens = tokenize(sentence);
            if tokens.is_empty() {
                return (index, 0.0);
            }
            let density = tokens.iter().filter_map(|t| weight.get(t)).sum::<f64>() / tokens.len() as f64;
            let title_overlap = tokens.iter().filter(|t| title_tokens.contains(t)).count() as f64
                / title_tokens.len().max(1) as f64;
            (index, density + title_overlap)
        })
        .collect();

    scored.sort_by(|(ia, sa), (ib, sb)| sb.total_cmp(sa).then(ia.cmp(ib)));
    let mut chosen: Vec<usize> = scored.into_iter().take(count).map(|(index, _)| index).collect();
    chosen.sort_unstable();

    chosen
        .into_iter()
        .map(|index| sentences[index].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// HTTP page fetcher producing [`PageContent`]
pub struct ArticleFetcher {
    client: reqwest::Client,
    summary_sentences: usize,
    max_keywords: usize,
}

impl ArticleFetcher {
    /// Create a fetcher from link configuration
    pub fn new(config: &LinkConfig) -> Result<Self, ExtractorError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ExtractorError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            summary_sentences: config.summary_sentences,
            max_keywords: config.max_keywords,
        })
    }

    /// Download a page body
    pub async fn get_html(&self, url: &str) -> Result<String, ExtractorError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!("GET {} -> {}", url, status);
        if !status.is_success() {
            return Err(ExtractorError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    /// Download and parse an article
    pub async fn fetch_article(&self, url: &str) -> Result<Article, ExtractorError> {
        let html = self.get_html(url).await?;
        Ok(parse_article(&html, self.summary_sentences, self.max_keywords))
    }

    /// Collect social-platform author handles linked from a page
    pub async fn discover_handles(&self, url: &str) -> Result<Vec<String>, ExtractorError> {
        let base = url::Url::parse(url)?;
        let html = self.get_html(url).await?;
        Ok(profile_handles(&html, Some(&base)))
    }
}

#[async_trait]
impl LinkContentSource for ArticleFetcher {
    type Error = ExtractorError;

    async fn fetch(&self, url: &str) -> Result<PageContent, Self::Error> {
        Ok(self.fetch_article(url).await?.into())
    }
}
