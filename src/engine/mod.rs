// file: src/engine/mod.rs
// description: question classification, answer synthesis and the session facade
// reference: internal module structure

pub mod classifier;
pub mod facade;
pub mod normalizer;
pub mod synthesizer;

pub use classifier::ThemeClassifier;
pub use facade::{Engine, EngineBuilder};
pub use normalizer::VerseNormalizer;
pub use synthesizer::Synthesizer;
