// file: src/knowledge/patterns.rs
// description: compiled regex patterns for tokenizing and citation handling
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // Everything that is not a letter or digit separates tokens
    pub static ref TOKEN_SEPARATOR: Regex = Regex::new(
        r"[^\p{L}\p{N}]+"
    ).expect("TOKEN_SEPARATOR regex is valid");

    // "Surah 15 Ayah 26:", "Verse 3:16 -", "Chapter 2"
    pub static ref CITATION_LABEL: Regex = Regex::new(
        r"(?i)\b(?:surah|sura|ayah|aya|verse|chapter)\s*\d+(?:\s*:\s*\d+)?\s*[:\-]?"
    ).expect("CITATION_LABEL regex is valid");

    // "(15:26)"
    pub static ref PAREN_REFERENCE: Regex = Regex::new(
        r"\(\s*\d+\s*:\s*\d+\s*\)"
    ).expect("PAREN_REFERENCE regex is valid");

    // Leading citation of a plain dataset entry, captured without the colon
    pub static ref LEADING_CITATION: Regex = Regex::new(
        r"(?i)^\s*((?:(?:surah|sura|ayah|aya|verse|chapter)\s*\d+(?:\s*:\s*\d+)?\s*)+)[:\-]\s*"
    ).expect("LEADING_CITATION regex is valid");

    pub static ref SPACE_BEFORE_PUNCTUATION: Regex = Regex::new(
        r"\s+([.,;:!?])"
    ).expect("SPACE_BEFORE_PUNCTUATION regex is valid");

    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).expect("WHITESPACE regex is valid");

    pub static ref STOP_WORDS: HashSet<&'static str> = [
        "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at",
        "be", "been", "before", "but", "by", "can", "could", "did", "do", "does", "for",
        "from", "had", "has", "have", "he", "her", "him", "his", "how", "i", "if", "in",
        "into", "is", "it", "its", "me", "my", "no", "not", "of", "on", "or", "our", "s",
        "she", "so", "t", "that", "the", "their", "them", "then", "there", "these", "they",
        "this", "to", "us", "was", "we", "were", "what", "when", "where", "which", "who",
        "why", "will", "with", "would", "you", "your",
    ]
    .into_iter()
    .collect();
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Splits a plain dataset entry into `(reference, text)` when it opens with a citation.
pub fn split_leading_citation(entry: &str) -> Option<(String, String)> {
    let captures = LEADING_CITATION.captures(entry)?;
    let whole = captures.get(0)?;
    let reference = captures.get(1)?.as_str().trim().to_string();
    Some((reference, entry[whole.end()..].trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_label_pattern() {
        assert!(CITATION_LABEL.is_match("Surah 15 Ayah 26: We created man"));
        assert!(CITATION_LABEL.is_match("verse 3:16"));
        assert!(!CITATION_LABEL.is_match("We created man from clay."));
    }

    #[test]
    fn test_paren_reference_pattern() {
        assert!(PAREN_REFERENCE.is_match("from clay (15:26)"));
        assert!(!PAREN_REFERENCE.is_match("from clay (see above)"));
    }

    #[test]
    fn test_split_leading_citation() {
        let (reference, text) =
            split_leading_citation("Surah 15 Ayah 26: We created man from clay.").unwrap();
        assert_eq!(reference, "Surah 15 Ayah 26");
        assert_eq!(text, "We created man from clay.");

        assert!(split_leading_citation("We created man from clay.").is_none());
    }

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("the"));
        assert!(!is_stop_word("clay"));
    }
}
