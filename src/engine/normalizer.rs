// file: src/engine/normalizer.rs
// description: turns stored scripture text into natural speech for display
// reference: citation stripping plus whole-word term substitution

use crate::config::TermSubstitution;
use crate::error::{EngineError, Result};
use crate::knowledge::patterns::{
    CITATION_LABEL, PAREN_REFERENCE, SPACE_BEFORE_PUNCTUATION, WHITESPACE,
};
use regex::Regex;

#[derive(Default)]
pub struct VerseNormalizer {
    substitutions: Vec<(Regex, String)>,
}

impl VerseNormalizer {
    /// Longer phrases are substituted first so they win over their own words.
    pub fn new(term_map: &[TermSubstitution]) -> Result<Self> {
        let mut ordered: Vec<&TermSubstitution> = term_map.iter().collect();
        ordered.sort_by(|a, b| b.from.len().cmp(&a.from.len()));

        let substitutions = ordered
            .into_iter()
            .map(|substitution| {
                let pattern = format!(r"\b{}\b", regex::escape(substitution.from.trim()));
                Regex::new(&pattern)
                    .map(|re| (re, substitution.to.clone()))
                    .map_err(|e| {
                        EngineError::Config(format!(
                            "invalid term_map entry '{}': {}",
                            substitution.from, e
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { substitutions })
    }

    pub fn strip_citations(&self, text: &str) -> String {
        let without_labels = CITATION_LABEL.replace_all(text, " ");
        let without_refs = PAREN_REFERENCE.replace_all(&without_labels, " ");
        let collapsed = WHITESPACE.replace_all(&without_refs, " ");
        SPACE_BEFORE_PUNCTUATION
            .replace_all(&collapsed, "$1")
            .trim()
            .to_string()
    }

    pub fn apply_term_map(&self, text: &str) -> String {
        self.substitutions
            .iter()
            .fold(text.to_string(), |acc, (pattern, replacement)| {
                pattern
                    .replace_all(&acc, regex::NoExpand(replacement))
                    .into_owned()
            })
    }

    /// Strips citations, then substitutes terms. Text that ends up empty is malformed.
    pub fn normalize(&self, text: &str) -> Result<String> {
        let stripped = self.strip_citations(text);
        let normalized = self.apply_term_map(&stripped);
        let normalized = normalized.trim_start_matches([':', '-', ' ']).trim();

        if normalized.is_empty() {
            return Err(EngineError::MalformedRecord(format!(
                "nothing left after normalizing '{}'",
                text
            )));
        }

        Ok(normalized.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SynthesisConfig;
    use pretty_assertions::assert_eq;

    fn normalizer() -> VerseNormalizer {
        VerseNormalizer::new(&SynthesisConfig::default_term_map()).unwrap()
    }

    #[test]
    fn test_strip_citation_labels() {
        let n = normalizer();

        assert_eq!(
            n.normalize("Surah 15 Ayah 26: We created man from clay.").unwrap(),
            "We created man from clay."
        );
        assert_eq!(
            n.normalize("Verse 3:16 - He is near.").unwrap(),
            "He is near."
        );
        assert_eq!(
            n.normalize("We created man from clay (15:26).").unwrap(),
            "We created man from clay."
        );
    }

    #[test]
    fn test_term_map_whole_words_only() {
        let n = normalizer();

        assert_eq!(
            n.normalize("Allah is with thee, and thy Lord hath mercy.").unwrap(),
            "God is with you, and your Lord has mercy."
        );
        assert_eq!(n.normalize("Thyme grows by the river.").unwrap(), "Thyme grows by the river.");
    }

    #[test]
    fn test_longer_phrases_substitute_first() {
        let n = VerseNormalizer::new(&[
            TermSubstitution::new("Lord", "Master"),
            TermSubstitution::new("Lord of the worlds", "Sustainer of all"),
        ])
        .unwrap();

        assert_eq!(
            n.normalize("Praise the Lord of the worlds.").unwrap(),
            "Praise the Sustainer of all."
        );
    }

    #[test]
    fn test_citation_only_text_is_malformed() {
        let n = normalizer();
        let err = n.normalize("Surah 15 Ayah 26:").unwrap_err();
        assert!(matches!(err, EngineError::MalformedRecord(_)));
        assert!(n.normalize("   ").is_err());
    }

    #[test]
    fn test_default_normalizer_only_strips() {
        let n = VerseNormalizer::default();
        assert_eq!(
            n.normalize("Surah 7 Ayah 156: My mercy encompasses all things, thee included.")
                .unwrap(),
            "My mercy encompasses all things, thee included."
        );
    }
}
