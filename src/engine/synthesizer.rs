// file: src/engine/synthesizer.rs
// description: merges theme verses, document hits and defaults into one answer
// reference: fixed precedence theme verse -> document -> default verse -> fallback

use crate::config::{ClassifierConfig, SelectionPolicy, SynthesisConfig};
use crate::engine::classifier::ThemeClassifier;
use crate::engine::normalizer::VerseNormalizer;
use crate::error::{EngineError, Result};
use crate::knowledge::{DocumentIndex, VerseStore};
use crate::models::{Answer, AnswerSource, DocumentRecord, Theme, VerseRecord};
use sha2::{Digest, Sha256};
use tracing::{debug, error, warn};

pub struct Synthesizer {
    classifier: ThemeClassifier,
    normalizer: VerseNormalizer,
    selection: SelectionPolicy,
    normalize_documents: bool,
    fallback_answer: String,
}

impl Synthesizer {
    pub fn new(
        classifier: ThemeClassifier,
        normalizer: VerseNormalizer,
        config: &SynthesisConfig,
    ) -> Self {
        Self {
            classifier,
            normalizer,
            selection: config.selection,
            normalize_documents: config.normalize_documents,
            fallback_answer: config.fallback_answer.clone(),
        }
    }

    pub fn from_config(classifier: &ClassifierConfig, synthesis: &SynthesisConfig) -> Result<Self> {
        Ok(Self::new(
            ThemeClassifier::new(classifier.rules.clone()),
            VerseNormalizer::new(&synthesis.term_map)?,
            synthesis,
        ))
    }

    pub fn classifier(&self) -> &ThemeClassifier {
        &self.classifier
    }

    pub fn answer(&self, question: &str, verses: &VerseStore, documents: &DocumentIndex) -> String {
        self.respond(question, verses, documents).text
    }

    /// Like `answer`, with the provenance of the text. Never fails and never
    /// returns empty text: errors degrade to the fallback answer.
    pub fn respond(&self, question: &str, verses: &VerseStore, documents: &DocumentIndex) -> Answer {
        match self.try_respond(question, verses, documents) {
            Ok(answer) if !answer.text.trim().is_empty() => answer,
            Ok(answer) => {
                warn!("Empty answer from {}, using fallback", answer.source);
                self.fallback()
            }
            Err(e) => {
                error!("Synthesis failed: {}", e);
                self.fallback()
            }
        }
    }

    fn try_respond(
        &self,
        question: &str,
        verses: &VerseStore,
        documents: &DocumentIndex,
    ) -> Result<Answer> {
        if let Some(theme) = self.classifier.classify(question) {
            let bucket = verses.get_verses_by_theme(theme);

            if bucket.is_empty() {
                debug!("No verses stored for theme {}", theme);
            } else {
                let start = self.selection_start(question, bucket.len());
                if let Some((text, verse)) = self.first_well_formed(&bucket, start) {
                    return Ok(Answer::new(
                        text,
                        AnswerSource::Verse {
                            theme,
                            reference: verse.reference.clone(),
                        },
                    ));
                }
                warn!("Every {} verse failed to normalize", theme);
            }
        }

        if let Some(hit) = documents.best_match(question) {
            return Ok(Answer::new(
                self.document_text(hit.document)?,
                AnswerSource::Document {
                    id: hit.document.id.clone(),
                    score: hit.score,
                },
            ));
        }

        let defaults = verses.get_verses_by_theme(Theme::Default);
        if let Some((text, verse)) = self.first_well_formed(&defaults, 0) {
            return Ok(Answer::new(
                text,
                AnswerSource::DefaultVerse {
                    reference: verse.reference.clone(),
                },
            ));
        }

        debug!("No candidate for '{}', using fallback", question);
        Ok(self.fallback())
    }

    /// Normalized text of the first verse that survives normalization,
    /// starting at `start` and wrapping around.
    fn first_well_formed<'a>(
        &self,
        bucket: &[&'a VerseRecord],
        start: usize,
    ) -> Option<(String, &'a VerseRecord)> {
        let len = bucket.len();
        (0..len)
            .map(|offset| bucket[(start + offset) % len])
            .find_map(|verse| match self.normalizer.normalize(&verse.text) {
                Ok(text) => Some((text, verse)),
                Err(e) => {
                    warn!("Skipping {} verse {}: {}", verse.theme, verse.reference, e);
                    None
                }
            })
    }

    fn selection_start(&self, question: &str, bucket_len: usize) -> usize {
        match self.selection {
            SelectionPolicy::First => 0,
            SelectionPolicy::QuestionHash => {
                let mut hasher = Sha256::new();
                hasher.update(question.trim().to_lowercase().as_bytes());
                let digest = hasher.finalize();
                let mut prefix = [0u8; 8];
                prefix.copy_from_slice(&digest[..8]);
                (u64::from_be_bytes(prefix) % bucket_len as u64) as usize
            }
        }
    }

    /// Document prose keeps its citations; only the term map applies.
    fn document_text(&self, document: &DocumentRecord) -> Result<String> {
        let raw = document.text.trim();
        if raw.is_empty() {
            return Err(EngineError::MalformedRecord(format!(
                "document {} has no text",
                document.id
            )));
        }

        if self.normalize_documents {
            return Ok(self.normalizer.apply_term_map(raw));
        }
        Ok(raw.to_string())
    }

    fn fallback(&self) -> Answer {
        Answer::new(self.fallback_answer.clone(), AnswerSource::Fallback)
    }
}
