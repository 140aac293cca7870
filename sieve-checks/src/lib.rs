//! Sieve checks
//!
//! Extraction of a string catalog from a localization repository and the
//! checks that run over it:
//! - `quotes`: straight quotes where Italian typography wants curly ones
//! - `spelling`: words unknown to the Hunspell dictionary
//!
//! Checks implement [`Check`] and are run through a [`CheckRegistry`].
//! Exceptions and error reports are stored as JSON through [`CheckStore`].

pub mod check;
pub mod service;
pub mod speller;
pub mod store;
pub mod text;

pub use check::{Check, CheckRegistry};
pub use service::{
    DEFAULT_EXCLUDED_FOLDERS, ExtractionService, QuoteCheck, SpellingCheck,
    StandardExtractionService,
};
pub use speller::{HunspellSpeller, Speller, SpellerError, WordListSpeller};
pub use store::CheckStore;
