//! Filter policy configuration

use crate::GatekeeperError;
use serde::{Deserialize, Serialize};

/// Required/ignored token policy
///
/// Entries may be single words (`"amazon"`) or phrases (`"blue origin"`);
/// a phrase matches when its words appear consecutively in the token set.
/// Built once at startup (defaults, then config file, then CLI overrides)
/// and passed by reference to every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPolicy {
    /// Tokens or phrases a post must mention, checked in order
    #[serde(default = "default_required")]
    pub required: Vec<String>,

    /// Tokens or phrases that reject a post outright
    #[serde(default = "default_ignored")]
    pub ignored: Vec<String>,

    /// Number of distinct required entries that must match
    #[serde(default = "default_min_required")]
    pub min_required: usize,
}

fn default_required() -> Vec<String> {
    [
        "jeff", "bezos", "jeff bezos", "#amazon", "@amazon", "amazon", "amzn", "#amzn", "alexa",
        "blue origin", "space",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_ignored() -> Vec<String> {
    vec!["win".to_string(), "giveaway".to_string()]
}

fn default_min_required() -> usize {
    1
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            required: default_required(),
            ignored: default_ignored(),
            min_required: default_min_required(),
        }
    }
}

impl FilterPolicy {
    /// Create a policy, normalizing entries
    pub fn new(required: Vec<String>, ignored: Vec<String>, min_required: usize) -> Self {
        Self {
            required: normalize_entries(required),
            ignored: normalize_entries(ignored),
            min_required,
        }
    }

    /// Replace the required entries
    pub fn with_required(mut self, required: Vec<String>) -> Self {
        self.required = normalize_entries(required);
        self
    }

    /// Replace the ignored entries
    pub fn with_ignored(mut self, ignored: Vec<String>) -> Self {
        self.ignored = normalize_entries(ignored);
        self
    }

    /// Lower-case, trim and de-duplicate all entries, keeping their order
    pub fn normalized(self) -> Self {
        Self::new(self.required, self.ignored, self.min_required)
    }

    /// Validate the policy
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        if self.min_required == 0 {
            return Err(GatekeeperError::Config(
                "min_required must be at least 1".to_string(),
            ));
        }
        if self.required.is_empty() {
            return Err(GatekeeperError::Config(
                "required token list cannot be empty".to_string(),
            ));
        }
        if self.min_required > self.required.len() {
            return Err(GatekeeperError::Config(format!(
                "min_required ({}) exceeds the number of required tokens ({})",
                self.min_required,
                self.required.len()
            )));
        }
        Ok(())
    }

    /// Load a policy from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, GatekeeperError> {
        let policy: FilterPolicy = toml::from_str(toml_str)?;
        Ok(policy.normalized())
    }

    /// Serialize the policy to a TOML string
    pub fn to_toml(&self) -> Result<String, GatekeeperError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn normalize_entries(entries: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = entry.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        if !entry.is_empty() && !out.contains(&entry) {
            out.push(entry);
        }
    }
    out
}
