//! Token policy evaluation

use crate::FilterPolicy;
use std::collections::HashSet;
use stocksight_domain::TokenSet;

/// Reasons for rejection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// No tokens survived normalization
    EmptyTokens,

    /// An ignored entry matched
    IgnoredToken(String),

    /// Too few required entries matched
    InsufficientRequired {
        /// Distinct required entries found
        found: usize,
        /// Minimum needed
        required: usize,
    },
}

/// Outcome of evaluating a token set against a policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    /// The token set is relevant
    Accepted {
        /// Required entries that matched, in policy order
        matched: Vec<String>,
    },

    /// The token set is rejected
    Rejected(RejectionReason),
}

impl FilterDecision {
    /// Whether the decision accepts the token set
    pub fn is_accepted(&self) -> bool {
        matches!(self, FilterDecision::Accepted { .. })
    }

    /// The rejection reason, if rejected
    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            FilterDecision::Rejected(reason) => Some(reason),
            FilterDecision::Accepted { .. } => None,
        }
    }
}

/// Evaluate a token set against a policy
///
/// 1. Empty tokens reject.
/// 2. The first ignored entry found rejects.
/// 3. Required entries are counted in policy order; the set is accepted as
///    soon as `min_required` distinct entries have matched.
pub fn evaluate(tokens: &TokenSet, policy: &FilterPolicy) -> FilterDecision {
    if tokens.is_empty() {
        return FilterDecision::Rejected(RejectionReason::EmptyTokens);
    }

    if let Some(entry) = policy.ignored.iter().find(|entry| entry_matches(tokens, entry)) {
        return FilterDecision::Rejected(RejectionReason::IgnoredToken(entry.clone()));
    }

    let mut seen = HashSet::new();
    let mut matched = Vec::new();
    for entry in &policy.required {
        if !seen.insert(entry.to_lowercase()) {
            continue;
        }
        if entry_matches(tokens, entry) {
            matched.push(entry.clone());
            if matched.len() >= policy.min_required {
                return FilterDecision::Accepted { matched };
            }
        }
    }

    FilterDecision::Rejected(RejectionReason::InsufficientRequired {
        found: matched.len(),
        required: policy.min_required,
    })
}

/// Whether a token set passes the policy
pub fn passes(tokens: &TokenSet, policy: &FilterPolicy) -> bool {
    evaluate(tokens, policy).is_accepted()
}

fn entry_matches(tokens: &TokenSet, entry: &str) -> bool {
    let entry = entry.to_lowercase();
    let words: Vec<&str> = entry.split_whitespace().collect();
    match words.as_slice() {
        [] => false,
        [word] => tokens.contains(word),
        run => tokens.contains_run(run),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    fn policy(required: &[&str], ignored: &[&str], min: usize) -> FilterPolicy {
        FilterPolicy::new(
            required.iter().map(|s| s.to_string()).collect(),
            ignored.iter().map(|s| s.to_string()).collect(),
            min,
        )
    }

    #[test]
    fn test_phrase_entries_match_consecutive_tokens() {
        let tokens = tokenize("Jeff Bezos announces new Blue Origin launch");
        let decision = evaluate(&tokens, &policy(&["jeff bezos", "blue origin"], &[], 2));
        assert_eq!(
            decision,
            FilterDecision::Accepted {
                matched: vec!["jeff bezos".to_string(), "blue origin".to_string()]
            }
        );
    }

    #[test]
    fn test_ignored_short_circuits_required() {
        let tokens = tokenize("giveaway alert win a free amazon echo");
        let decision = evaluate(&tokens, &policy(&["amazon"], &["giveaway", "win"], 1));
        assert_eq!(
            decision,
            FilterDecision::Rejected(RejectionReason::IgnoredToken("giveaway".to_string()))
        );
    }

    #[test]
    fn test_insufficient_required() {
        let tokens = tokenize("amazon earnings beat expectations");
        let decision = evaluate(&tokens, &policy(&["amazon", "bezos"], &[], 2));
        assert_eq!(
            decision,
            FilterDecision::Rejected(RejectionReason::InsufficientRequired {
                found: 1,
                required: 2
            })
        );
    }

    #[test]
    fn test_accepts_when_threshold_reached() {
        let tokens = tokenize("amazon and bezos");
        assert!(passes(&tokens, &policy(&["amazon", "bezos"], &[], 2)));
        assert!(passes(&tokens, &policy(&["bezos", "tesla"], &[], 1)));
    }

    #[test]
    fn test_empty_tokens_reject() {
        let decision = evaluate(&TokenSet::default(), &FilterPolicy::default());
        assert_eq!(decision.rejection(), Some(&RejectionReason::EmptyTokens));
    }

    #[test]
    fn test_duplicate_required_entries_count_once() {
        let tokens = tokenize("amazon news");
        let policy = FilterPolicy {
            required: vec!["amazon".into(), "Amazon".into()],
            ignored: vec![],
            min_required: 2,
        };
        assert!(!passes(&tokens, &policy));
    }

    #[test]
    fn test_hash_prefixed_entries_never_match_stripped_tokens() {
        let tokens = tokenize("#amazon prime day");
        assert!(!passes(&tokens, &policy(&["#amazon"], &[], 1)));
        assert!(passes(&tokens, &policy(&["amazon"], &[], 1)));
    }
}
