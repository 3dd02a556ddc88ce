//! Global configuration constants for textdb.
//!
//! All tuning parameters are defined here as compile-time constants. None of
//! them affect correctness; callers that need different values should wrap
//! the engine rather than patch these.

/// Maximum number of documents returned by a single search.
///
/// Ranked result lists are truncated to this length after sorting.
pub const MAX_RESULT_COUNT: usize = 5;

/// Relevance comparison tolerance for result ordering.
///
/// Two relevance values closer than this are considered equal and the tie is
/// broken by descending rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Sliding-window length of the request tracker, in logical ticks.
///
/// One tick per recorded request; 1440 corresponds to the minutes in a day.
pub const REQUEST_WINDOW_TICKS: u64 = 1440;

/// Number of shards in the concurrent accumulator used by parallel scoring.
///
/// Any positive value is correct. A small prime keeps keys spread evenly
/// without oversubscribing memory for short queries.
pub const CONCURRENT_MAP_SHARDS: usize = 7;
