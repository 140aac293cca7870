//! Text utilities shared by the checks
//!
//! - Markup stripping for HTML embedded in translations
//! - Placeable patterns per file format
//! - A Treebank-style word tokenizer
//! - Built-in stop words

pub mod markup;
pub mod placeables;
pub mod stopwords;
pub mod tokenize;

pub use markup::strip_tags;
pub use placeables::{remove_placeables, strip_fluent_quote_syntax};
pub use stopwords::StopWords;
pub use tokenize::{is_punctuation, tokenize};
