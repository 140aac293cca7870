//! Quotes check
//!
//! Italian typography uses curly quotes (`“ ”`, `’`). Straight quotes in a
//! translation are reported, except where markup or Fluent syntax requires
//! them.

use anyhow::Result;
use sieve_core::{CheckReport, QuoteExceptions, QuoteReport, StringCatalog};
use tracing::{debug, info};

use crate::check::Check;
use crate::store::CheckStore;
use crate::text::{strip_fluent_quote_syntax, strip_tags};

const STRAIGHT_QUOTES: [char; 3] = ['\'', '"', '‘'];

/// Reports strings that use straight quotes
#[derive(Debug, Clone, Default)]
pub struct QuoteCheck;

impl QuoteCheck {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the catalog without touching the filesystem
    pub fn evaluate(&self, catalog: &StringCatalog, exceptions: &QuoteExceptions) -> QuoteReport {
        let mut report = QuoteReport::default();

        for (id, message) in catalog.iter() {
            if exceptions.contains(id) {
                report.matched_exceptions.push(id.to_string());
                continue;
            }

            if !message.contains(STRAIGHT_QUOTES) {
                continue;
            }

            let cleaned = strip_fluent_quote_syntax(&strip_tags(message));
            if !cleaned.contains(STRAIGHT_QUOTES) {
                continue;
            }

            debug!("{}: wrong quotes\n{}", id, message);
            report.errors.push(id.to_string());
        }

        report
    }
}

impl Check for QuoteCheck {
    fn id(&self) -> &'static str {
        "quotes"
    }

    fn run(&self, catalog: &StringCatalog, store: &CheckStore) -> Result<CheckReport> {
        let exceptions = store.quote_exceptions()?;
        let report = self.evaluate(catalog, &exceptions);
        info!(
            "Quotes check: {} error(s), {} exception(s) used",
            report.errors.len(),
            report.matched_exceptions.len()
        );

        // Drop exceptions that no longer match anything
        if report.matched_exceptions != exceptions.0 {
            debug!(
                "Pruning quote exceptions: {} -> {}",
                exceptions.0.len(),
                report.matched_exceptions.len()
            );
            store.save_quote_exceptions(&QuoteExceptions(report.matched_exceptions.clone()))?;
        }

        let report = CheckReport::Quotes(report);
        store.write_errors(&report)?;

        Ok(report)
    }
}
