//! Tokenization of cleaned text into a [`TokenSet`]

use crate::stopwords::is_stop_word;
use stocksight_domain::TokenSet;

/// Tokens shorter than this many characters are dropped
pub const MIN_TOKEN_LEN: usize = 3;

/// Split cleaned text into filter tokens
///
/// Lower-cases, splits on whitespace, strips punctuation inside each piece,
/// and keeps only alphabetic words of at least [`MIN_TOKEN_LEN`] characters
/// that are not stop words. Deterministic and idempotent over its own joined
/// output.
pub fn tokenize(text: &str) -> TokenSet {
    text.split_whitespace()
        .map(|piece| {
            piece
                .to_lowercase()
                .chars()
                .filter(|c| !is_punctuation(*c))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty() && word.chars().all(char::is_alphabetic))
        .filter(|word| word.chars().count() >= MIN_TOKEN_LEN)
        .filter(|word| !is_stop_word(word))
        .collect::<Vec<_>>()
        .into()
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '\u{2013}' | '\u{2014}' | '\u{2026}'
        )
}
