// file: src/knowledge/dataset.rs
// description: authoritative verse sources used to (re)populate the verse store
// reference: bundled JSON dataset keyed by theme

use crate::error::{EngineError, Result};
use crate::knowledge::patterns::split_leading_citation;
use crate::models::{Theme, VerseRecord};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const BUNDLED_VERSES: &str = include_str!("../../data/verses.json");

/// Raw source the verse store rebuilds itself from.
pub trait VerseSource: Send + Sync {
    fn name(&self) -> &str;

    fn load(&self) -> Result<Vec<VerseRecord>>;
}

/// Dataset compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledDataset;

impl VerseSource for BundledDataset {
    fn name(&self) -> &str {
        "bundled"
    }

    fn load(&self) -> Result<Vec<VerseRecord>> {
        parse_dataset(self.name(), BUNDLED_VERSES)
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VerseSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<VerseRecord>> {
        let raw = fs::read_to_string(&self.path).map_err(|source| EngineError::FileOperation {
            path: self.path.clone(),
            source,
        })?;
        parse_dataset(self.name(), &raw)
    }
}

/// Records held in memory, handed out again on every load.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<VerseRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<VerseRecord>) -> Self {
        Self { records }
    }
}

impl VerseSource for InMemorySource {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn load(&self) -> Result<Vec<VerseRecord>> {
        Ok(self.records.clone())
    }
}

/// Parses a `{ "<theme>": [entry, ...] }` dataset.
///
/// An entry is either a string, whose leading citation becomes the
/// reference, or an object `{ "text": .., "reference": .. }`. Unknown themes
/// and entries without text are skipped. Records come out grouped in
/// `Theme::ALL` order, each group in file order.
pub fn parse_dataset(source_name: &str, raw: &str) -> Result<Vec<VerseRecord>> {
    let parsed: BTreeMap<String, Vec<Value>> =
        serde_json::from_str(raw).map_err(|e| EngineError::Dataset {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;

    let mut grouped: BTreeMap<Theme, Vec<VerseRecord>> = BTreeMap::new();

    for (key, entries) in parsed {
        let theme = match key.parse::<Theme>() {
            Ok(theme) => theme,
            Err(_) => {
                warn!("Skipping unknown theme '{}' in {}", key, source_name);
                continue;
            }
        };

        for (position, entry) in entries.into_iter().enumerate() {
            match entry_to_record(theme, &entry) {
                Ok(record) => grouped.entry(theme).or_default().push(record),
                Err(e) => warn!(
                    "Skipping {} entry #{} in {}: {}",
                    theme, position, source_name, e
                ),
            }
        }
    }

    let records: Vec<VerseRecord> = Theme::ALL
        .into_iter()
        .filter_map(|theme| grouped.remove(&theme))
        .flatten()
        .collect();

    debug!("Parsed {} verses from {}", records.len(), source_name);
    Ok(records)
}

fn entry_to_record(theme: Theme, entry: &Value) -> Result<VerseRecord> {
    let record = match entry {
        Value::String(raw) => match split_leading_citation(raw) {
            Some((reference, text)) => VerseRecord::new(theme, text, reference),
            None => VerseRecord::new(theme, raw.trim(), ""),
        },
        Value::Object(fields) => {
            let text = fields
                .get("text")
                .and_then(Value::as_str)
                .ok_or_else(|| EngineError::MalformedRecord("missing text field".to_string()))?;
            let reference = fields
                .get("reference")
                .and_then(Value::as_str)
                .unwrap_or_default();
            VerseRecord::new(theme, text.trim(), reference.trim())
        }
        other => {
            return Err(EngineError::MalformedRecord(format!(
                "expected string or object, found {}",
                other
            )));
        }
    };

    if !record.is_well_formed() {
        return Err(EngineError::MalformedRecord("blank text".to_string()));
    }

    Ok(record)
}
