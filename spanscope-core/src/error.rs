//! Error types for spanscope-core.

use thiserror::Error;

/// Result type for spanscope-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for spanscope-core operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A span's offsets violate the bounds of its document.
    #[error("Invalid span: {label} [{start}, {end}) does not fit a document of {doc_len} tokens")]
    InvalidSpan {
        /// Label carried by the offending span.
        label: String,
        /// Start token index (inclusive).
        start: usize,
        /// End token index (exclusive).
        end: usize,
        /// Token count of the owning document.
        doc_len: usize,
    },

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create an invalid span error.
    #[must_use]
    pub fn invalid_span(label: impl Into<String>, start: usize, end: usize, doc_len: usize) -> Self {
        Self::InvalidSpan {
            label: label.into(),
            start,
            end,
            doc_len,
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
