use anyhow::Result;
use sieve_core::{CheckReport, StringCatalog};

use crate::store::CheckStore;

/// Trait for Sieve checks.
///
/// A check inspects every string of a catalog, loads its own exceptions from
/// the store, writes its error file and returns a report. Checks must have a
/// unique identifier, which is also the basename of their error file.
///
/// # Example
///
/// ```rust
/// use anyhow::Result;
/// use sieve_checks::{Check, CheckStore};
/// use sieve_core::{CheckReport, QuoteReport, StringCatalog};
///
/// struct EmptyValues;
///
/// impl Check for EmptyValues {
///     fn id(&self) -> &'static str {
///         "empty-values"
///     }
///
///     fn run(&self, catalog: &StringCatalog, _store: &CheckStore) -> Result<CheckReport> {
///         let errors = catalog
///             .iter()
///             .filter(|(_, value)| value.is_empty())
///             .map(|(id, _)| id.to_string())
///             .collect();
///         Ok(CheckReport::Quotes(QuoteReport {
///             errors,
///             matched_exceptions: Vec::new(),
///         }))
///     }
/// }
/// ```
pub trait Check: Send + Sync {
    /// Returns the unique identifier of this check.
    fn id(&self) -> &'static str;

    /// Runs the check against a catalog.
    ///
    /// # Arguments
    /// * `catalog` - All extracted strings
    /// * `store` - Exception and error file storage
    ///
    /// # Errors
    /// Returns an error if exception files cannot be read or the error file
    /// cannot be written. Violations are not errors; they are reported.
    fn run(&self, catalog: &StringCatalog, store: &CheckStore) -> Result<CheckReport>;
}

/// Registry of checks, run in registration order
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// Creates a new empty check registry
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Registers a check
    ///
    /// # Panics
    /// Panics if a check with the same ID is already registered
    pub fn register<C: Check + 'static>(&mut self, check: C) {
        let id = check.id();
        if self.checks.iter().any(|c| c.id() == id) {
            panic!("Check with id '{}' is already registered", id);
        }
        self.checks.push(Box::new(check));
    }

    /// Runs every registered check
    ///
    /// # Errors
    /// Returns the first error encountered
    pub fn run_all(&self, catalog: &StringCatalog, store: &CheckStore) -> Result<Vec<CheckReport>> {
        self.checks
            .iter()
            .map(|check| check.run(catalog, store))
            .collect()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}
