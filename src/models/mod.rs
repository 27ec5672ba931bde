// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod answer;
pub mod document;
pub mod search_result;
pub mod theme;
pub mod verse;

pub use answer::{Answer, AnswerSource};
pub use document::DocumentRecord;
pub use search_result::SearchResult;
pub use theme::Theme;
pub use verse::VerseRecord;
