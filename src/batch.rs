//! Batch query pipeline.
//!
//! Fans a list of raw queries out across the rayon pool; every query runs the
//! engine's sequential ranked search independently, so there is no shared
//! mutable state between tasks. A parse failure in any query fails the batch.

use crate::document::ScoredDocument;
use crate::engine::SearchEngine;
use crate::error::SearchError;
use rayon::prelude::*;

/// Runs every query in parallel and returns the result lists index-aligned
/// with `queries`.
pub fn process_queries(
    engine: &SearchEngine,
    queries: &[String],
) -> Result<Vec<Vec<ScoredDocument>>, SearchError> {
    queries
        .par_iter()
        .map(|query| engine.find_top_documents(query))
        .collect()
}

/// Like [`process_queries`], flattened into one list in input-query order.
pub fn process_queries_joined(
    engine: &SearchEngine,
    queries: &[String],
) -> Result<Vec<ScoredDocument>, SearchError> {
    Ok(process_queries(engine, queries)?
        .into_iter()
        .flatten()
        .collect())
}
