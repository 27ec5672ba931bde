// file: src/models/verse.rs
// description: verse record stored in the themed verse store
// reference: internal data structures

use crate::models::Theme;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub theme: Theme,
    pub text: String,
    /// Book/chapter/verse label. Kept for diagnostics, never displayed.
    pub reference: String,
}

impl VerseRecord {
    pub fn new(theme: Theme, text: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            theme,
            text: text.into(),
            reference: reference.into(),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
