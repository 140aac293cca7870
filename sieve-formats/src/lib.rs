//! Sieve localization file formats
//!
//! This crate parses the localization file formats found in a Mozilla-style
//! l10n repository into a common [`Resource`] model:
//! - `.dtd` XML entity definitions
//! - `.ftl` Fluent messages and terms
//! - `.inc` preprocessor `#define` files
//! - `.ini` sectioned key/value files (also used for Sieve's own config)
//! - `.properties` Java-style key/value files
//!
//! Parsers only extract entries; they do not validate the message syntax
//! beyond what is needed to find entry boundaries.

pub mod dtd;
pub mod error;
pub mod fluent;
pub mod inc;
pub mod ini;
pub mod properties;
pub mod resource;

pub use error::{ParseError, Result};
pub use resource::{Entry, Format, Resource, Section, parse_resource, parse_str};
