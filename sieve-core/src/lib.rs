//! Sieve Core
//!
//! Core types shared by the Sieve localization checker.
//!
//! This crate contains:
//! - Domain types: extracted strings, the string catalog, exception files
//! - Reports: results produced by the individual checks

pub mod domain;

pub use domain::catalog::{L10nString, StringCatalog};
pub use domain::exceptions::{QuoteExceptions, SpellingExceptions, SpellingExclusions};
pub use domain::report::{CheckReport, QuoteReport, SpellingReport};
