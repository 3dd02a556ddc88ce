//! TF-IDF scoring for a parsed query against the inverted index.
//!
//! The sequential path accumulates relevance in an ordered map; the parallel
//! path processes query words concurrently into a sharded
//! [`ConcurrentMap`](crate::ConcurrentMap) and snapshots it afterwards. Both
//! produce the same scores: per plus-word, `tf * ln(N / df)` summed over the
//! word's postings, with minus-words erasing every document they occur in.

use super::SearchEngine;
use crate::concurrent_map::ConcurrentMap;
use crate::config;
use crate::document::{DocumentId, DocumentStatus, ScoredDocument};
use crate::query::Query;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub(crate) fn find_all_documents<F>(
    engine: &SearchEngine,
    query: &Query,
    filter: &F,
) -> Vec<ScoredDocument>
where
    F: Fn(DocumentId, DocumentStatus, i32) -> bool,
{
    let mut document_to_relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();

    for word in &query.plus_words {
        let Some(postings) = engine.word_to_document_freqs.get(word) else {
            continue;
        };
        if postings.is_empty() {
            continue;
        }
        let inverse_document_freq = engine.inverse_document_freq(postings.len());
        for (&document_id, &term_freq) in postings {
            if let Some(document) = engine.documents.get(&document_id) {
                if filter(document_id, document.status, document.rating) {
                    *document_to_relevance.entry(document_id).or_insert(0.0) +=
                        term_freq * inverse_document_freq;
                }
            }
        }
    }

    for word in &query.minus_words {
        let Some(postings) = engine.word_to_document_freqs.get(word) else {
            continue;
        };
        for &document_id in postings.keys() {
            document_to_relevance.remove(&document_id);
        }
    }

    materialize(engine, document_to_relevance)
}

pub(crate) fn find_all_documents_par<F>(
    engine: &SearchEngine,
    query: &Query,
    filter: &F,
) -> Vec<ScoredDocument>
where
    F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
{
    let document_to_relevance: ConcurrentMap<DocumentId, f64> =
        ConcurrentMap::new(config::CONCURRENT_MAP_SHARDS);

    query.plus_words.par_iter().for_each(|word| {
        let Some(postings) = engine.word_to_document_freqs.get(word) else {
            return;
        };
        if postings.is_empty() {
            return;
        }
        let inverse_document_freq = engine.inverse_document_freq(postings.len());
        for (&document_id, &term_freq) in postings {
            if let Some(document) = engine.documents.get(&document_id) {
                if filter(document_id, document.status, document.rating) {
                    *document_to_relevance.access(document_id) +=
                        term_freq * inverse_document_freq;
                }
            }
        }
    });

    query.minus_words.par_iter().for_each(|word| {
        let Some(postings) = engine.word_to_document_freqs.get(word) else {
            return;
        };
        for document_id in postings.keys() {
            document_to_relevance.erase(document_id);
        }
    });

    materialize(engine, document_to_relevance.build_ordinary_map())
}

fn materialize(
    engine: &SearchEngine,
    document_to_relevance: BTreeMap<DocumentId, f64>,
) -> Vec<ScoredDocument> {
    document_to_relevance
        .into_iter()
        .filter_map(|(document_id, relevance)| {
            engine.documents.get(&document_id).map(|document| ScoredDocument {
                id: document_id,
                relevance,
                rating: document.rating,
            })
        })
        .collect()
}

/// Sorts by descending relevance, breaking near-ties by descending rating,
/// and truncates to the result cap.
pub(crate) fn sort_and_truncate(mut results: Vec<ScoredDocument>) -> Vec<ScoredDocument> {
    results.sort_unstable_by(|lhs, rhs| {
        if (lhs.relevance - rhs.relevance).abs() < config::RELEVANCE_EPSILON {
            rhs.rating.cmp(&lhs.rating)
        } else {
            rhs.relevance
                .partial_cmp(&lhs.relevance)
                .unwrap_or(Ordering::Equal)
        }
    });
    results.truncate(config::MAX_RESULT_COUNT);
    results
}
