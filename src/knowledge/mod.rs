// file: src/knowledge/mod.rs
// description: verse store, document index and their loaders
// reference: internal module structure

pub mod dataset;
pub mod document_index;
pub mod loader;
pub mod patterns;
pub mod tokenizer;
pub mod verse_store;

pub use dataset::{BundledDataset, InMemorySource, JsonFileSource, VerseSource, parse_dataset};
pub use document_index::DocumentIndex;
pub use loader::DocumentLoader;
pub use verse_store::{StoreState, VerseStore};
