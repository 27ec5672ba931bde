// file: src/models/document.rs
// description: document record held by the lexical index
// reference: internal data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

const DERIVED_ID_LEN: usize = 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub text: String,
    pub content_hash: String,
    /// Filled by `DocumentIndex::load` so indexing and querying share one tokenizer.
    #[serde(skip)]
    pub(crate) term_counts: HashMap<String, u32>,
}

impl DocumentRecord {
    /// Builds a record; when `id` is absent it is derived from the content hash.
    pub fn new(id: Option<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let content_hash = Self::compute_hash(&text);
        let id = id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| content_hash[..DERIVED_ID_LEN].to_string());

        Self {
            id,
            text,
            content_hash,
            term_counts: HashMap::new(),
        }
    }

    pub fn with_title(id: Option<String>, title: Option<&str>, text: &str) -> Self {
        match title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(title) => Self::new(id, format!("{}\n\n{}", title, text)),
            None => Self::new(id, text),
        }
    }

    fn compute_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn term_count(&self, term: &str) -> u32 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    pub fn term_counts(&self) -> &HashMap<String, u32> {
        &self.term_counts
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
