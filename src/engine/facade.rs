// file: src/engine/facade.rs
// description: session engine owning the verse store, document index and synthesizer
// reference: application bootstrap and orchestration

use crate::config::{ClassifierConfig, Config, KnowledgeConfig, SynthesisConfig};
use crate::engine::synthesizer::Synthesizer;
use crate::error::{EngineError, Result};
use crate::knowledge::{
    BundledDataset, DocumentIndex, DocumentLoader, JsonFileSource, StoreState, VerseSource,
    VerseStore,
};
use crate::models::{Answer, DocumentRecord, SearchResult, Theme, VerseRecord};
use crate::utils::{HealthCheck, HealthReport, OperationTimer, Validator};
use std::collections::BTreeMap;
use tracing::{info, warn};

pub const VERSE_STORE_COMPONENT: &str = "verse_store";
pub const DOCUMENT_INDEX_COMPONENT: &str = "document_index";

/// One answering session: load once, then read-only.
///
/// `answer` takes `&self`, so an `Arc<Engine>` can serve concurrent readers.
/// `emergency_rebuild` needs `&mut self`; shared engines must be behind a
/// lock to call it.
pub struct Engine {
    verses: VerseStore,
    documents: DocumentIndex,
    synthesizer: Synthesizer,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Builds the session from configuration.
    ///
    /// Fails with `RecoveryFailure` when the verse store stays empty after an
    /// emergency rebuild. Missing or unreadable document collections only
    /// leave the index empty.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let source: Box<dyn VerseSource> = match &config.knowledge.verses_path {
            Some(path) => Box::new(JsonFileSource::new(path)),
            None => Box::new(BundledDataset),
        };

        let initial = match source.load() {
            Ok(records) => Some(records),
            Err(e) => {
                warn!("Initial verse load from {} failed: {}", source.name(), e);
                None
            }
        };

        let mut builder = EngineBuilder::new()
            .verse_source(source)
            .documents(load_documents(&config.knowledge))
            .classifier(config.classifier.clone())
            .synthesis(config.synthesis.clone());

        if let Some(records) = initial {
            builder = builder.verses(records);
        }

        builder.build()
    }

    /// Plain-text answer; never empty and never an error.
    pub fn answer(&self, question: &str) -> String {
        self.synthesizer
            .answer(question, &self.verses, &self.documents)
    }

    pub fn respond(&self, question: &str) -> Answer {
        self.synthesizer
            .respond(question, &self.verses, &self.documents)
    }

    pub fn classify(&self, question: &str) -> Option<Theme> {
        self.synthesizer.classifier().classify(question)
    }

    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchResult<'_>> {
        self.documents.search(query, top_k)
    }

    pub fn is_populated(&self) -> bool {
        self.verses.is_populated()
    }

    pub fn verse_count_by_theme(&self) -> BTreeMap<Theme, usize> {
        self.verses.verse_count_by_theme()
    }

    pub fn emergency_rebuild(&mut self) -> bool {
        self.verses.emergency_rebuild()
    }

    pub fn verse_store(&self) -> &VerseStore {
        &self.verses
    }

    pub fn document_index(&self) -> &DocumentIndex {
        &self.documents
    }

    pub fn health_report(&self) -> HealthReport {
        let counts = self.verse_count_by_theme();
        let summary = counts
            .iter()
            .map(|(theme, count)| format!("{}: {}", theme, count))
            .collect::<Vec<_>>()
            .join(", ");
        let empty_themes: Vec<String> = counts
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(theme, _)| theme.to_string())
            .collect();

        let verse_check = match self.verses.state() {
            StoreState::Populated if empty_themes.is_empty() => {
                HealthCheck::healthy(VERSE_STORE_COMPONENT, self.verses.len()).with_message(summary)
            }
            StoreState::Populated => HealthCheck::degraded(
                VERSE_STORE_COMPONENT,
                format!("{} (no verses for {})", summary, empty_themes.join(", ")),
                self.verses.len(),
            ),
            StoreState::Empty => HealthCheck::unhealthy(
                VERSE_STORE_COMPONENT,
                "verse memory is empty; run an emergency rebuild".to_string(),
                0,
            ),
            StoreState::RecoveryFailed => HealthCheck::unhealthy(
                VERSE_STORE_COMPONENT,
                format!("emergency rebuild from {} failed", self.verses.source_name()),
                0,
            ),
        };

        let index_check = if self.documents.is_empty() {
            HealthCheck::degraded(
                DOCUMENT_INDEX_COMPONENT,
                "no documents indexed; free-text questions use the default answer".to_string(),
                0,
            )
        } else {
            HealthCheck::healthy(DOCUMENT_INDEX_COMPONENT, self.documents.len()).with_message(
                format!("{} distinct terms", self.documents.vocabulary_size()),
            )
        };

        HealthReport::new(
            vec![verse_check, index_check],
            env!("CARGO_PKG_VERSION").to_string(),
        )
    }
}

/// Programmatic construction of an `Engine`.
pub struct EngineBuilder {
    verse_source: Option<Box<dyn VerseSource>>,
    verses: Option<Vec<VerseRecord>>,
    documents: Vec<DocumentRecord>,
    classifier: ClassifierConfig,
    synthesis: SynthesisConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            verse_source: None,
            verses: None,
            documents: Vec::new(),
            classifier: ClassifierConfig::default(),
            synthesis: SynthesisConfig::default(),
        }
    }

    /// Source for emergency rebuilds. Defaults to the bundled dataset.
    pub fn verse_source(mut self, source: Box<dyn VerseSource>) -> Self {
        self.verse_source = Some(source);
        self
    }

    /// Records to populate the store with before any rebuild is considered.
    pub fn verses(mut self, records: Vec<VerseRecord>) -> Self {
        self.verses = Some(records);
        self
    }

    pub fn documents(mut self, documents: Vec<DocumentRecord>) -> Self {
        self.documents = documents;
        self
    }

    pub fn classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn synthesis(mut self, synthesis: SynthesisConfig) -> Self {
        self.synthesis = synthesis;
        self
    }

    /// Fails with `Config` on blank keywords, an empty fallback answer or a
    /// blank term-map entry, before any verse is loaded.
    pub fn build(self) -> Result<Engine> {
        self.classifier.validate()?;
        self.synthesis.validate()?;

        let source = self
            .verse_source
            .unwrap_or_else(|| Box::new(BundledDataset));
        let mut verses = VerseStore::new(source);

        if let Some(records) = self.verses {
            verses.populate(records);
        }

        if !verses.is_populated() {
            warn!("Verse store is empty, performing emergency rebuild");
            if !verses.emergency_rebuild() {
                return Err(EngineError::RecoveryFailure(format!(
                    "no verses could be recovered from {}",
                    verses.source_name()
                )));
            }
        }

        let timer = OperationTimer::new("document indexing");
        let mut documents = DocumentIndex::new();
        let indexed = documents.load(self.documents);
        timer.finish_with_count(indexed);

        let synthesizer = Synthesizer::from_config(&self.classifier, &self.synthesis)?;

        info!(
            "Engine ready: {} verses, {} documents",
            verses.len(),
            documents.len()
        );

        Ok(Engine {
            verses,
            documents,
            synthesizer,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn load_documents(knowledge: &KnowledgeConfig) -> Vec<DocumentRecord> {
    let mut documents = Vec::new();

    if let Some(path) = &knowledge.documents_path {
        let loaded = Validator::validate_file_path(path)
            .and_then(|_| Validator::validate_json_extension(path))
            .and_then(|_| DocumentLoader::load_from_json(path));
        match loaded {
            Ok(loaded) => documents.extend(loaded),
            Err(e) => warn!("Skipping document collection {}: {}", path.display(), e),
        }
    }

    if let Some(dir) = &knowledge.documents_dir {
        let loaded = Validator::validate_directory(dir)
            .and_then(|_| DocumentLoader::load_from_directory(dir));
        match loaded {
            Ok(loaded) => documents.extend(loaded),
            Err(e) => warn!("Skipping document directory {}: {}", dir.display(), e),
        }
    }

    documents
}
