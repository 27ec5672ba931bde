// file: src/models/search_result.rs
// description: ranked document hit returned by the lexical index
// reference: Used for TF-IDF similarity search results

use crate::models::DocumentRecord;
use crate::utils::Validator;

#[derive(Debug, Clone, Copy)]
pub struct SearchResult<'a> {
    pub document: &'a DocumentRecord,

    /// Cosine similarity between query and document, in (0.0, 1.0]
    pub score: f32,
}

impl SearchResult<'_> {
    /// Format as a summary string for display
    pub fn format_summary(&self, max_content_len: usize) -> String {
        let content_preview = Validator::truncate_text(&self.document.text, max_content_len);

        format!(
            "Score: {:.4} | {}\n{}\n",
            self.score, self.document.id, content_preview
        )
    }
}
