// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod engine;
pub mod error;
pub mod knowledge;
pub mod models;
pub mod utils;

pub use config::{
    ClassifierConfig, Config, KnowledgeConfig, MatchMode, SelectionPolicy, SynthesisConfig,
    TermSubstitution, ThemeRule,
};
pub use engine::{Engine, EngineBuilder, Synthesizer, ThemeClassifier, VerseNormalizer};
pub use error::{EngineError, Result};
pub use knowledge::{
    BundledDataset, DocumentIndex, DocumentLoader, InMemorySource, JsonFileSource, StoreState,
    VerseSource, VerseStore,
};
pub use models::{Answer, AnswerSource, DocumentRecord, SearchResult, Theme, VerseRecord};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, Validator};
