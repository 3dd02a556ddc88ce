//! Whitespace tokenizer.
//!
//! Words are maximal runs of non-space bytes; splitting happens on the ASCII
//! space only. There is no case folding, stemming, or Unicode segmentation —
//! callers index and query with the exact bytes they stored.

/// Splits `text` into words on single-space boundaries, discarding empty runs.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// Returns `true` if `word` contains no control bytes (`0x00..=0x1F`).
///
/// Control bytes are rejected everywhere: documents, queries, and stop words.
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|byte| byte < 0x20)
}
