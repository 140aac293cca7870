//! Service layer
//!
//! Services hold the business logic of Sieve: extracting strings from a
//! repository and running the checks over them. Extraction is trait-based so
//! that callers can substitute their own source of strings.

mod extraction;
mod quotes;
mod spelling;

// Re-export traits
pub use extraction::ExtractionService;

// Re-export implementations
pub use extraction::{DEFAULT_EXCLUDED_FOLDERS, StandardExtractionService};
pub use quotes::QuoteCheck;
pub use spelling::SpellingCheck;
