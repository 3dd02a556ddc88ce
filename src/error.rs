//! Crate error type.

use crate::document::DocumentId;
use thiserror::Error;

/// Errors surfaced by the engine. Nothing is caught or retried internally;
/// every failure propagates to the caller of the outermost operation, and a
/// failed mutation leaves the engine unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A stop word contains a control byte.
    #[error("stop word {0:?} contains unavailable characters")]
    InvalidStopWord(String),

    /// Negative or duplicate document id, or document text with control bytes.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A query word is empty after stripping `-`, carries a double minus, or
    /// contains control bytes.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A document id passed to matching is not present in the engine.
    #[error("unknown document id {0}")]
    UnknownDocument(DocumentId),
}
