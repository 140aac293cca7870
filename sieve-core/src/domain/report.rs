//! Check report domain types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of the quotes check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteReport {
    /// Ids of strings using straight quotes
    pub errors: Vec<String>,
    /// Exceptions that were hit during the run, in catalog order
    pub matched_exceptions: Vec<String>,
}

/// Result of the spelling check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingReport {
    /// Misspelled tokens per string id
    pub errors: BTreeMap<String, Vec<String>>,
    /// Occurrences of each misspelled token across all strings
    pub misspelled: BTreeMap<String, usize>,
    /// Ids skipped through an exclusion or an exception token
    pub ignored: Vec<String>,
}

impl SpellingReport {
    /// Total number of misspelled tokens
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Misspelled words seen at least `threshold` times, most frequent first
    pub fn frequent_words(&self, threshold: usize) -> Vec<(&str, usize)> {
        let mut words: Vec<(&str, usize)> = self
            .misspelled
            .iter()
            .filter(|(_, count)| **count >= threshold)
            .map(|(word, count)| (word.as_str(), *count))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        words
    }

    /// Records an ignored id once
    pub fn mark_ignored(&mut self, id: &str) {
        if !self.ignored.iter().any(|i| i == id) {
            self.ignored.push(id.to_string());
        }
    }
}

/// Report of a single check, as produced by the check registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckReport {
    Quotes(QuoteReport),
    Spelling(SpellingReport),
}

impl CheckReport {
    /// Identifier of the check; also the basename of its JSON error file
    pub fn id(&self) -> &'static str {
        match self {
            CheckReport::Quotes(_) => "quotes",
            CheckReport::Spelling(_) => "spelling",
        }
    }

    pub fn has_errors(&self) -> bool {
        match self {
            CheckReport::Quotes(report) => !report.errors.is_empty(),
            CheckReport::Spelling(report) => !report.errors.is_empty(),
        }
    }

    /// The errors in the layout of the check's JSON error file
    pub fn errors_json(&self) -> serde_json::Value {
        match self {
            CheckReport::Quotes(report) => serde_json::json!(report.errors),
            CheckReport::Spelling(report) => serde_json::json!(report.errors),
        }
    }
}
