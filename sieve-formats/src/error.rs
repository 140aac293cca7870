//! Error types for the format parsers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a localization file
#[derive(Debug, Error)]
pub enum ParseError {
    /// File extension does not map to a supported format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source does not follow the format's syntax
    #[error("Syntax error at line {line}: {message}")]
    Syntax {
        /// 1-based line number
        line: usize,
        message: String,
    },
}

impl ParseError {
    /// Create a syntax error at a 1-based line number
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Line number of a syntax error
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}
