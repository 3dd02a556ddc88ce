//! Core document value types.
//!
//! A document is identified by a caller-chosen non-negative [`DocumentId`]
//! and carries a [`DocumentStatus`] and an integer rating, both fixed at
//! insertion time. Search methods return [`ScoredDocument`] values that the
//! caller owns outright.

use serde::{Deserialize, Serialize};

/// Caller-chosen document identifier. Must be non-negative and unique.
pub type DocumentId = i64;

/// Moderation status attached to a document at insertion.
///
/// [`SearchEngine::find_top_documents`](crate::SearchEngine::find_top_documents)
/// filters to `Actual` by default; the other variants are reachable through
/// the status and predicate overloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Live document, included by the default search filter.
    Actual,
    /// Document kept in the index but no longer relevant.
    Irrelevant,
    /// Document hidden by moderation.
    Banned,
    /// Document scheduled for deletion.
    Removed,
}

/// A search hit: document id, TF-IDF relevance, and the document's rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// Id of the matched document.
    pub id: DocumentId,
    /// Accumulated TF-IDF relevance over the query's plus-words.
    pub relevance: f64,
    /// Arithmetic-mean rating recorded at insertion.
    pub rating: i32,
}
