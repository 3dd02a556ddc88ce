//! Query parsing.
//!
//! A raw query string is split into plus-words (must be present) and
//! minus-words (veto a document entirely). A leading `-` marks a minus-word;
//! the remainder must be a valid non-empty word. Stop words are dropped from
//! both collections before they are recorded.

use crate::error::SearchError;
use crate::text::{is_valid_word, split_words, StopWordSet};

/// A parsed query: plus-words and minus-words, disjoint by construction
/// unless the raw query listed a word both ways.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Words a matching document must contain.
    pub plus_words: Vec<String>,
    /// Words whose presence excludes a document.
    pub minus_words: Vec<String>,
}

impl Query {
    /// Parses `text` against `stop_words`.
    ///
    /// With `canonicalize` set, both collections are sorted and deduplicated;
    /// the ranked-search path relies on this, while the parallel matcher
    /// canonicalizes plus-words itself after the fact.
    pub fn parse(
        text: &str,
        stop_words: &StopWordSet,
        canonicalize: bool,
    ) -> Result<Self, SearchError> {
        let mut query = Query::default();
        for word in split_words(text) {
            let (candidate, is_minus) = match word.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (word, false),
            };
            if candidate.is_empty() || candidate.starts_with('-') || !is_valid_word(candidate) {
                return Err(SearchError::InvalidQuery(format!(
                    "malformed query word {word:?}"
                )));
            }
            if stop_words.contains(candidate) {
                continue;
            }
            if is_minus {
                query.minus_words.push(candidate.to_string());
            } else {
                query.plus_words.push(candidate.to_string());
            }
        }
        if canonicalize {
            query.plus_words.sort_unstable();
            query.plus_words.dedup();
            query.minus_words.sort_unstable();
            query.minus_words.dedup();
        }
        Ok(query)
    }
}
