//! # textdb
//!
//! An embeddable in-memory full-text search engine with TF-IDF ranking,
//! minus-word exclusion, and parallel query execution.
//!
//! ## Features
//!
//! - **TF-IDF ranked search** over an inverted index, with stop-word
//!   filtering and minus-word veto, truncated to a fixed top-5
//! - **Predicate filtering** by document id, status, and rating
//! - **Parallel variants** of search, matching, and removal built on rayon,
//!   accumulating through a sharded concurrent map
//! - **Batch query pipeline** fanning many queries across the thread pool
//! - **Duplicate sweep** collapsing documents with identical word sets
//! - **Request tracker** counting empty-result searches over a sliding window
//!
//! ## Architecture
//!
//! ```text
//! text → tokenizer → (stop-word filter | query parser)
//!      → SearchEngine { inverted index, forward index, document table }
//!      → scorer (sequential | parallel via ConcurrentMap) → ranked top-K
//! ```
//!
//! The engine is purely in-memory and synchronous: no persistence, no
//! network, no background tasks. Readers (`&self`) may run concurrently;
//! writers (`&mut self`) are exclusive by construction.

/// Batch query pipeline: parallel fan-out over many raw queries.
pub mod batch;
/// Sharded concurrent accumulator used by parallel scoring.
pub mod concurrent_map;
/// Global configuration constants: result cap, epsilon, window, shards.
pub mod config;
/// Duplicate-document sweep.
pub mod dedup;
/// Core document value types: ids, statuses, scored results.
pub mod document;
/// The search engine: indices plus query, match, and mutation operations.
pub mod engine;
/// Crate error type.
pub mod error;
/// Query parsing: plus- and minus-words with validation.
pub mod query;
/// Sliding-window tracker of empty-result searches.
pub mod rate_tracker;
/// Text primitives: whitespace tokenization and the stop-word set.
pub mod text;

pub use batch::{process_queries, process_queries_joined};
pub use concurrent_map::ConcurrentMap;
pub use dedup::remove_duplicates;
pub use document::{DocumentId, DocumentStatus, ScoredDocument};
pub use engine::SearchEngine;
pub use error::SearchError;
pub use query::Query;
pub use rate_tracker::RequestTracker;
pub use text::StopWordSet;
