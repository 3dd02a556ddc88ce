//! The search engine: document table, inverted and forward indices, and the
//! query, match, and mutation operations over them.
//!
//! The engine owns all index state. Mutations (`add_document`,
//! `remove_document*`) take `&mut self`; queries take `&self`, so any number
//! of readers may run concurrently and the borrow checker rules out a reader
//! racing a writer. Parallel query variants fan work out with rayon inside a
//! single call and never outlive it.

/// TF-IDF scoring over the inverted index, sequential and parallel.
pub(crate) mod scorer;

use crate::document::{DocumentId, DocumentStatus, ScoredDocument};
use crate::error::SearchError;
use crate::query::Query;
use crate::text::{split_words, StopWordSet};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

static EMPTY_WORD_FREQS: LazyLock<HashMap<String, f64>> = LazyLock::new(HashMap::new);
static EMPTY_WORDS: BTreeSet<String> = BTreeSet::new();

/// Per-document metadata fixed at insertion.
#[derive(Debug, Clone, Copy)]
struct DocumentData {
    rating: i32,
    status: DocumentStatus,
}

/// In-memory full-text search engine with TF-IDF ranking.
///
/// Documents are bags of space-delimited words. The inverted index maps each
/// word to the documents containing it with its term frequency; the forward
/// index is the exact inverse and is what makes removal cheap. Both are kept
/// in lockstep by every mutation.
#[derive(Debug, Default)]
pub struct SearchEngine {
    stop_words: StopWordSet,
    /// word → (document id → term frequency).
    word_to_document_freqs: HashMap<String, HashMap<DocumentId, f64>>,
    /// document id → (word → term frequency). Inverse of the above.
    document_to_word_freqs: HashMap<DocumentId, HashMap<String, f64>>,
    /// document id → distinct words, for matching and duplicate detection.
    document_words: HashMap<DocumentId, BTreeSet<String>>,
    documents: HashMap<DocumentId, DocumentData>,
    document_ids: BTreeSet<DocumentId>,
}

impl SearchEngine {
    /// Creates an engine with no stop words.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with stop words taken from any iterable.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            stop_words: StopWordSet::new(stop_words)?,
            ..Self::default()
        })
    }

    /// Creates an engine with stop words taken from a whitespace-delimited
    /// string.
    pub fn with_stop_words_text(text: &str) -> Result<Self, SearchError> {
        Ok(Self {
            stop_words: StopWordSet::from_text(text)?,
            ..Self::default()
        })
    }

    /// Indexes a document.
    ///
    /// The id must be non-negative and not already present. Stop words are
    /// dropped before indexing; a document made of stop words alone is stored
    /// with an empty word set. Validation happens before any index is
    /// touched, so a failed call leaves the engine unchanged.
    pub fn add_document(
        &mut self,
        document_id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<(), SearchError> {
        if document_id < 0 {
            return Err(SearchError::InvalidDocument(format!(
                "negative document id {document_id}"
            )));
        }
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::InvalidDocument(format!(
                "document id {document_id} already present"
            )));
        }
        let words = self.split_into_words_no_stop(text)?;

        let inverse_word_count = 1.0 / words.len() as f64;
        for &word in &words {
            *self
                .word_to_document_freqs
                .entry(word.to_string())
                .or_default()
                .entry(document_id)
                .or_insert(0.0) += inverse_word_count;
            *self
                .document_to_word_freqs
                .entry(document_id)
                .or_default()
                .entry(word.to_string())
                .or_insert(0.0) += inverse_word_count;
        }
        self.document_words
            .insert(document_id, words.iter().map(|word| word.to_string()).collect());
        self.documents.insert(
            document_id,
            DocumentData {
                rating: average_rating(ratings),
                status,
            },
        );
        self.document_ids.insert(document_id);
        tracing::debug!(document_id, words = words.len(), "indexed document");
        Ok(())
    }

    /// Removes a document from every index. Missing ids are ignored.
    pub fn remove_document(&mut self, document_id: DocumentId) {
        if !self.documents.contains_key(&document_id) {
            return;
        }
        if let Some(word_freqs) = self.document_to_word_freqs.remove(&document_id) {
            for word in word_freqs.keys() {
                if let Some(postings) = self.word_to_document_freqs.get_mut(word) {
                    postings.remove(&document_id);
                }
            }
        }
        self.finish_removal(document_id);
    }

    /// Parallel removal: erases the document's postings across inverted-index
    /// buckets concurrently. Each bucket is owned by exactly one task, so no
    /// two tasks write the same entry.
    pub fn remove_document_par(&mut self, document_id: DocumentId) {
        if !self.documents.contains_key(&document_id) {
            return;
        }
        if let Some(word_freqs) = self.document_to_word_freqs.remove(&document_id) {
            self.word_to_document_freqs
                .par_iter_mut()
                .filter(|(word, _)| word_freqs.contains_key(word.as_str()))
                .for_each(|(_, postings)| {
                    postings.remove(&document_id);
                });
        }
        self.finish_removal(document_id);
    }

    fn finish_removal(&mut self, document_id: DocumentId) {
        self.document_ids.remove(&document_id);
        self.documents.remove(&document_id);
        self.document_words.remove(&document_id);
        tracing::debug!(document_id, "removed document");
    }

    /// Ranked search filtered to [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>, SearchError> {
        self.find_top_documents_with(raw_query, |_, status, _| status == DocumentStatus::Actual)
    }

    /// Ranked search filtered to a single status.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>, SearchError> {
        self.find_top_documents_with(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Ranked search under an arbitrary predicate over (id, status, rating).
    ///
    /// Results are sorted by descending relevance, ties within
    /// [`RELEVANCE_EPSILON`](crate::config::RELEVANCE_EPSILON) broken by
    /// descending rating, and truncated to
    /// [`MAX_RESULT_COUNT`](crate::config::MAX_RESULT_COUNT).
    pub fn find_top_documents_with<F>(
        &self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<ScoredDocument>, SearchError>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = Query::parse(raw_query, &self.stop_words, true)?;
        Ok(scorer::sort_and_truncate(scorer::find_all_documents(
            self, &query, &filter,
        )))
    }

    /// Parallel counterpart of [`find_top_documents`](Self::find_top_documents).
    pub fn find_top_documents_par(
        &self,
        raw_query: &str,
    ) -> Result<Vec<ScoredDocument>, SearchError> {
        self.find_top_documents_with_par(raw_query, |_, status, _| {
            status == DocumentStatus::Actual
        })
    }

    /// Parallel counterpart of
    /// [`find_top_documents_with_status`](Self::find_top_documents_with_status).
    pub fn find_top_documents_with_status_par(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>, SearchError> {
        self.find_top_documents_with_par(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Parallel counterpart of
    /// [`find_top_documents_with`](Self::find_top_documents_with): plus- and
    /// minus-words are processed in parallel, accumulating into a sharded
    /// [`ConcurrentMap`](crate::ConcurrentMap). Same results, same order.
    pub fn find_top_documents_with_par<F>(
        &self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<ScoredDocument>, SearchError>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = Query::parse(raw_query, &self.stop_words, true)?;
        Ok(scorer::sort_and_truncate(scorer::find_all_documents_par(
            self, &query, &filter,
        )))
    }

    /// Returns the query's plus-words present in the given document, in
    /// canonical (ascending) order, together with the document's status.
    ///
    /// If any minus-word occurs in the document the word list is empty.
    /// Fails with [`SearchError::UnknownDocument`] for an absent id.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus), SearchError> {
        let document = self
            .documents
            .get(&document_id)
            .ok_or(SearchError::UnknownDocument(document_id))?;
        let query = Query::parse(raw_query, &self.stop_words, true)?;
        let words = self.words_by_id(document_id);

        for word in &query.minus_words {
            if words.contains(word) {
                return Ok((Vec::new(), document.status));
            }
        }
        let matched = query
            .plus_words
            .into_iter()
            .filter(|word| words.contains(word))
            .collect();
        Ok((matched, document.status))
    }

    /// Parallel matcher: the minus-word veto is checked up front, then the
    /// deduplicated plus-words are tested concurrently. The returned order is
    /// unspecified.
    pub fn match_document_par(
        &self,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus), SearchError> {
        let document = self
            .documents
            .get(&document_id)
            .ok_or(SearchError::UnknownDocument(document_id))?;
        let mut query = Query::parse(raw_query, &self.stop_words, false)?;
        let words = self.words_by_id(document_id);

        for word in &query.minus_words {
            if words.contains(word) {
                return Ok((Vec::new(), document.status));
            }
        }
        query.plus_words.sort_unstable();
        query.plus_words.dedup();

        let matched = Mutex::new(Vec::with_capacity(query.plus_words.len()));
        query.plus_words.par_iter().for_each(|word| {
            if words.contains(word) {
                matched.lock().push(word.clone());
            }
        });
        Ok((matched.into_inner(), document.status))
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Iterates document ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.document_ids.iter().copied()
    }

    /// The word → term frequency map of a document, empty for absent ids.
    pub fn word_frequencies(&self, document_id: DocumentId) -> &HashMap<String, f64> {
        self.document_to_word_freqs
            .get(&document_id)
            .unwrap_or(&EMPTY_WORD_FREQS)
    }

    /// The distinct words of a document, empty for absent ids.
    pub fn words_by_id(&self, document_id: DocumentId) -> &BTreeSet<String> {
        self.document_words
            .get(&document_id)
            .unwrap_or(&EMPTY_WORDS)
    }

    /// Splits document text, validating characters and dropping stop words.
    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>, SearchError> {
        let mut words = Vec::new();
        for word in split_words(text) {
            if !crate::text::is_valid_word(word) {
                return Err(SearchError::InvalidDocument(format!(
                    "word {word:?} contains unavailable characters"
                )));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    /// `ln(N / df)` over the current document count.
    ///
    /// N deliberately counts every document, including those a search
    /// predicate later rejects.
    fn inverse_document_freq(&self, document_freq: usize) -> f64 {
        (self.documents.len() as f64 / document_freq as f64).ln()
    }
}

/// Integer arithmetic mean, truncated toward zero; 0 for no ratings.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&rating| i64::from(rating)).sum();
    (sum / ratings.len() as i64) as i32
}
