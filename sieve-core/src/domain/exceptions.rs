//! Exception file domain types
//!
//! Exceptions record known, accepted violations. They live as JSON files in
//! the `exceptions/` directory and are pruned by the checks after every run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String ids exempt from the quotes check (`exceptions/quotes.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteExceptions(pub Vec<String>);

impl QuoteExceptions {
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|e| e == id)
    }
}

/// Accepted tokens per string id (`exceptions/spelling.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellingExceptions(pub BTreeMap<String, Vec<String>>);

impl SpellingExceptions {
    /// Returns true if `token` is an accepted token for the string `id`
    pub fn allows(&self, id: &str, token: &str) -> bool {
        self.0
            .get(id)
            .is_some_and(|tokens| tokens.iter().any(|t| t == token))
    }
}

/// Files and strings skipped entirely by the spelling check
/// (`exceptions/spelling_exclusions.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingExclusions {
    /// Path prefixes, matched against the file part of the string id
    #[serde(default)]
    pub excluded_files: Vec<String>,
    /// Full string ids
    #[serde(default)]
    pub excluded_strings: Vec<String>,
}

impl SpellingExclusions {
    pub fn excludes_file(&self, file: &str) -> bool {
        self.excluded_files.iter().any(|prefix| file.starts_with(prefix))
    }

    pub fn excludes_string(&self, id: &str) -> bool {
        self.excluded_strings.iter().any(|s| s == id)
    }
}
