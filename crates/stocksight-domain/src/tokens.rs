//! Token module - normalized word units used for relevance filtering

/// Ordered sequence of normalized tokens
///
/// Order is preserved so multi-word policy entries can be matched as
/// consecutive runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet(Vec<String>);

impl TokenSet {
    /// Wrap an already-normalized token sequence
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    /// Whether the set holds no tokens
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate the tokens in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Borrow the tokens as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether a single token is present
    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    /// Whether the given words appear as a consecutive run
    pub fn contains_run(&self, words: &[&str]) -> bool {
        if words.is_empty() || words.len() > self.0.len() {
            return false;
        }
        self.0
            .windows(words.len())
            .any(|window| window.iter().zip(words).all(|(t, w)| t == w))
    }

    /// Join the tokens back into a single space-separated string
    pub fn join(&self) -> String {
        self.0.join(" ")
    }
}

impl From<Vec<String>> for TokenSet {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl<'a> FromIterator<&'a str> for TokenSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_run() {
        let tokens: TokenSet = ["jeff", "bezos", "announces", "blue", "origin"]
            .into_iter()
            .collect();

        assert!(tokens.contains_run(&["jeff", "bezos"]));
        assert!(tokens.contains_run(&["blue", "origin"]));
        assert!(!tokens.contains_run(&["bezos", "blue"]));
        assert!(!tokens.contains_run(&[]));
    }

    #[test]
    fn test_join() {
        let tokens: TokenSet = ["alpha", "beta"].into_iter().collect();
        assert_eq!(tokens.join(), "alpha beta");
        assert_eq!(tokens.len(), 2);
    }
}
