//! Duplicate-document sweep.
//!
//! Two documents are duplicates when their distinct-word sets coincide. The
//! sweep scans ids in ascending order, keeps the first document of each word
//! set, and removes the rest, reporting each removal to the caller's sink.

use crate::document::DocumentId;
use crate::engine::SearchEngine;
use std::collections::HashSet;
use std::io::{self, Write};

/// Removes every document whose distinct-word set was already seen at a lower
/// id, writing `Found duplicate document id <id>` per removal to `sink`.
///
/// Returns the removed ids in ascending order.
pub fn remove_duplicates<W: Write>(
    engine: &mut SearchEngine,
    sink: &mut W,
) -> io::Result<Vec<DocumentId>> {
    let duplicates: Vec<DocumentId> = {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for document_id in engine.ids() {
            if !seen.insert(engine.words_by_id(document_id)) {
                duplicates.push(document_id);
            }
        }
        duplicates
    };

    for &document_id in &duplicates {
        writeln!(sink, "Found duplicate document id {document_id}")?;
        tracing::info!(document_id, "removed duplicate document");
        engine.remove_document(document_id);
    }
    Ok(duplicates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;

    fn add(engine: &mut SearchEngine, id: DocumentId, text: &str) {
        engine
            .add_document(id, text, DocumentStatus::Actual, &[1, 2])
            .unwrap();
    }

    #[test]
    fn test_keeps_lowest_id_of_each_word_set() {
        let mut engine = SearchEngine::with_stop_words_text("and with").unwrap();
        add(&mut engine, 1, "funny pet and nasty rat");
        add(&mut engine, 2, "funny pet with curly hair");
        // Same word set as 2: word order and multiplicity are irrelevant.
        add(&mut engine, 3, "funny pet with curly hair");
        add(&mut engine, 4, "curly hair funny pet pet");
        // Same word set as 1 despite the repeats.
        add(&mut engine, 5, "funny funny pet and nasty nasty rat");
        add(&mut engine, 6, "nasty rat with curly hair");

        let mut sink = Vec::new();
        let removed = remove_duplicates(&mut engine, &mut sink).unwrap();
        assert_eq!(removed, vec![3, 4, 5]);
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "Found duplicate document id 3\n\
             Found duplicate document id 4\n\
             Found duplicate document id 5\n"
        );
        assert_eq!(engine.ids().collect::<Vec<_>>(), vec![1, 2, 6]);

        // No two survivors share a word set now; a second sweep is a no-op.
        let mut sink = Vec::new();
        assert!(remove_duplicates(&mut engine, &mut sink).unwrap().is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_stop_word_only_documents_collapse_to_one() {
        let mut engine = SearchEngine::with_stop_words_text("in the").unwrap();
        add(&mut engine, 0, "in the");
        add(&mut engine, 1, "the in the");
        add(&mut engine, 2, "in");
        let mut sink = Vec::new();
        let removed = remove_duplicates(&mut engine, &mut sink).unwrap();
        assert_eq!(removed, vec![1, 2]);
        assert_eq!(engine.ids().collect::<Vec<_>>(), vec![0]);
    }
}
