//! Core domain types
//!
//! These types are shared between the format parsers (which produce strings),
//! the checks (which consume them) and the CLI (which reports on them).

pub mod catalog;
pub mod exceptions;
pub mod report;
