//! Stop-word set.
//!
//! Built once at engine construction from either an iterable of words or a
//! whitespace-delimited string. Stop words never enter the index and never
//! become plus- or minus-words of a query.

use crate::error::SearchError;
use crate::text::tokenizer::{is_valid_word, split_words};
use std::collections::HashSet;

/// An immutable set of words excluded from documents and queries.
///
/// Duplicate and empty entries are discarded at construction. Construction
/// fails if any entry contains a control byte.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Builds the set from any iterable of words.
    pub fn new<I, S>(stop_words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = HashSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if !is_valid_word(word) {
                return Err(SearchError::InvalidStopWord(word.to_string()));
            }
            if !word.is_empty() {
                words.insert(word.to_string());
            }
        }
        Ok(Self { words })
    }

    /// Builds the set from a whitespace-delimited string.
    pub fn from_text(text: &str) -> Result<Self, SearchError> {
        Self::new(split_words(text))
    }

    /// Returns `true` if `word` is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set holds no stop words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
