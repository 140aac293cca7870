//! Exception and error file storage
//!
//! Checks read their accepted violations from `exceptions/` and write their
//! findings to `errors/`. All files are pretty-printed JSON with sorted keys
//! and non-ASCII characters kept as-is, so they diff cleanly in git.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sieve_core::{CheckReport, QuoteExceptions, SpellingExceptions, SpellingExclusions};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const QUOTE_EXCEPTIONS_FILE: &str = "quotes.json";
pub const SPELLING_EXCEPTIONS_FILE: &str = "spelling.json";
pub const SPELLING_EXCLUSIONS_FILE: &str = "spelling_exclusions.json";

/// File-backed storage for exceptions and error reports
#[derive(Debug, Clone)]
pub struct CheckStore {
    exceptions_dir: PathBuf,
    errors_dir: PathBuf,
}

impl CheckStore {
    pub fn new(exceptions_dir: impl Into<PathBuf>, errors_dir: impl Into<PathBuf>) -> Self {
        Self {
            exceptions_dir: exceptions_dir.into(),
            errors_dir: errors_dir.into(),
        }
    }

    /// Store using `<root>/exceptions` and `<root>/errors`
    pub fn from_root(root: &Path) -> Self {
        Self::new(root.join("exceptions"), root.join("errors"))
    }

    pub fn exceptions_dir(&self) -> &Path {
        &self.exceptions_dir
    }

    pub fn errors_dir(&self) -> &Path {
        &self.errors_dir
    }

    pub fn quote_exceptions(&self) -> Result<QuoteExceptions> {
        read_json(&self.exceptions_dir.join(QUOTE_EXCEPTIONS_FILE))
    }

    pub fn save_quote_exceptions(&self, exceptions: &QuoteExceptions) -> Result<()> {
        write_json(&self.exceptions_dir.join(QUOTE_EXCEPTIONS_FILE), exceptions)
    }

    pub fn spelling_exceptions(&self) -> Result<SpellingExceptions> {
        read_json(&self.exceptions_dir.join(SPELLING_EXCEPTIONS_FILE))
    }

    pub fn save_spelling_exceptions(&self, exceptions: &SpellingExceptions) -> Result<()> {
        write_json(&self.exceptions_dir.join(SPELLING_EXCEPTIONS_FILE), exceptions)
    }

    pub fn spelling_exclusions(&self) -> Result<SpellingExclusions> {
        read_json(&self.exceptions_dir.join(SPELLING_EXCLUSIONS_FILE))
    }

    /// Write the errors of a report to `errors/<check id>.json`
    pub fn write_errors(&self, report: &CheckReport) -> Result<PathBuf> {
        let path = self.errors_dir.join(format!("{}.json", report.id()));
        write_json(&path, &report.errors_json())?;
        Ok(path)
    }
}

/// Read a JSON file; a missing file yields the default value
fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        debug!("{:?} does not exist, using an empty default", path);
        return Ok(T::default());
    }

    let source =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&source).with_context(|| format!("Failed to parse JSON in {:?}", path))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let mut content = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {:?}", path))?;
    content.push('\n');

    std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    debug!("Wrote {:?}", path);
    Ok(())
}
