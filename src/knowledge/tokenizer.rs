// file: src/knowledge/tokenizer.rs
// description: single tokenization policy shared by indexing, querying and classification
// reference: lowercase, punctuation-stripped, whitespace-delimited terms

use crate::knowledge::patterns::{TOKEN_SEPARATOR, is_stop_word};
use std::collections::HashMap;

/// Every token of `text`, lowercased, in order. Stop words are kept.
pub fn raw_tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_SEPARATOR
        .split(&lowered)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Index terms of `text`: `raw_tokens` without stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    raw_tokens(text)
        .into_iter()
        .filter(|token| !is_stop_word(token))
        .collect()
}

pub fn term_counts(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for term in tokenize(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}
