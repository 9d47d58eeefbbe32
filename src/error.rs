//! Error types for the pdftoolbox engine.
//!
//! Every fallible engine operation returns [`PdfError`]. Parse failures and
//! serialization failures are kept separate: the former means the caller's
//! bytes were not a well-formed PDF, the latter means an in-memory document
//! could not be written back and points at a bug rather than bad input.
//!
//! Page-range parsing is deliberately infallible (see [`crate::range`]);
//! invalid tokens are dropped, never reported.

use std::io;

use thiserror::Error;

/// Result type alias for pdftoolbox operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Main error type for pdftoolbox operations.
#[derive(Debug, Error)]
pub enum PdfError {
    /// Input bytes are not a well-formed PDF document.
    #[error("failed to parse PDF document: {0}")]
    Parse(String),

    /// An in-memory document could not be serialized. This should be
    /// unreachable for structurally valid documents.
    #[error("failed to serialize PDF document: {0}")]
    Serialize(String),

    /// A merge operation failed part-way through.
    #[error("merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// A split operation failed. The whole batch is aborted; no partial
    /// outputs are returned.
    #[error("split operation failed: {reason}")]
    SplitFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Packing split outputs into an archive failed.
    #[error("failed to build archive: {0}")]
    Archive(String),

    /// A glob pattern on the command line could not be resolved.
    #[error("failed to resolve pattern: {0}")]
    Pattern(String),

    /// Generic I/O error from the CLI file layer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PdfError {
    /// Create a `Parse` error from any displayable cause.
    pub fn parse(cause: impl ToString) -> Self {
        Self::Parse(cause.to_string())
    }

    /// Create a `Serialize` error from any displayable cause.
    pub fn serialize(cause: impl ToString) -> Self {
        Self::Serialize(cause.to_string())
    }

    /// Create a `MergeFailed` error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create a `SplitFailed` error.
    pub fn split_failed(reason: impl Into<String>) -> Self {
        Self::SplitFailed {
            reason: reason.into(),
        }
    }
}
