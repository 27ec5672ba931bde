// file: src/models/answer.rs
// description: synthesized answer text with its provenance
// reference: internal data structures

use crate::models::Theme;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerSource {
    Verse { theme: Theme, reference: String },
    Document { id: String, score: f32 },
    DefaultVerse { reference: String },
    Fallback,
}

impl fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerSource::Verse { theme, reference } => {
                write!(f, "verse [{}] {}", theme, reference)
            }
            AnswerSource::Document { id, score } => write!(f, "document {} ({:.4})", id, score),
            AnswerSource::DefaultVerse { reference } => write!(f, "default verse {}", reference),
            AnswerSource::Fallback => f.write_str("fallback"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

impl Answer {
    pub fn new(text: impl Into<String>, source: AnswerSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}
