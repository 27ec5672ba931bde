// file: src/knowledge/verse_store.rs
// description: theme-bucketed verse store with explicit population state and emergency rebuild
// reference: two-state recovery machine (Empty -> Populated, with a failure sink)

use crate::knowledge::dataset::VerseSource;
use crate::models::{Theme, VerseRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreState {
    /// Nothing loaded yet.
    Empty,
    Populated,
    /// The last rebuild recovered no records. Verse answering is off for the session.
    RecoveryFailed,
}

pub struct VerseStore {
    source: Box<dyn VerseSource>,
    records: Vec<VerseRecord>,
    buckets: BTreeMap<Theme, Vec<usize>>,
    state: StoreState,
}

impl VerseStore {
    pub fn new(source: Box<dyn VerseSource>) -> Self {
        Self {
            source,
            records: Vec::new(),
            buckets: BTreeMap::new(),
            state: StoreState::Empty,
        }
    }

    /// Replaces the contents with `records`, skipping blank ones.
    /// Returns how many records were stored.
    pub fn populate(&mut self, records: Vec<VerseRecord>) -> usize {
        self.records.clear();
        self.buckets.clear();

        for record in records {
            if !record.is_well_formed() {
                warn!(
                    "Skipping malformed {} verse ({})",
                    record.theme,
                    if record.reference.is_empty() {
                        "no reference"
                    } else {
                        record.reference.as_str()
                    }
                );
                continue;
            }

            let position = self.records.len();
            self.buckets.entry(record.theme).or_default().push(position);
            self.records.push(record);
        }

        self.state = if self.records.is_empty() {
            StoreState::Empty
        } else {
            StoreState::Populated
        };

        self.records.len()
    }

    pub fn is_populated(&self) -> bool {
        self.state == StoreState::Populated && self.buckets.values().any(|b| !b.is_empty())
    }

    /// Bucket for `theme` in insertion order; empty when nothing is stored for it.
    pub fn get_verses_by_theme(&self, theme: Theme) -> Vec<&VerseRecord> {
        self.buckets
            .get(&theme)
            .map(|positions| positions.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// Reloads every bucket from the verse source.
    ///
    /// The reload is staged: current buckets are replaced only when the
    /// source yields at least one well-formed record. A populated store
    /// keeps its verses when the source fails; a store with nothing to keep
    /// moves to `RecoveryFailed`. Calling it repeatedly against the same
    /// source yields the same buckets in the same order.
    pub fn emergency_rebuild(&mut self) -> bool {
        info!("Rebuilding verse store from {}", self.source.name());

        let staged: Vec<VerseRecord> = match self.source.load() {
            Ok(records) => records
                .into_iter()
                .filter(VerseRecord::is_well_formed)
                .collect(),
            Err(e) => {
                error!("Verse source {} could not be read: {}", self.source.name(), e);
                Vec::new()
            }
        };

        if staged.is_empty() {
            if self.is_populated() {
                warn!(
                    "Emergency rebuild recovered no verses, keeping {} stored verses",
                    self.records.len()
                );
            } else {
                self.state = StoreState::RecoveryFailed;
                error!("Emergency rebuild recovered no verses");
            }
            return false;
        }

        let stored = self.populate(staged);
        info!(
            "Emergency rebuild stored {} verses across {} themes",
            stored,
            self.buckets.len()
        );
        true
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count per theme; every theme is listed, including empty ones.
    pub fn verse_count_by_theme(&self) -> BTreeMap<Theme, usize> {
        Theme::ALL
            .into_iter()
            .map(|theme| (theme, self.buckets.get(&theme).map_or(0, Vec::len)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EngineError, Result};
    use crate::knowledge::dataset::{BundledDataset, InMemorySource, JsonFileSource};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    struct BrokenSource;

    impl VerseSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        fn load(&self) -> Result<Vec<VerseRecord>> {
            Err(EngineError::Dataset {
                source_name: "broken".to_string(),
                message: "unreadable".to_string(),
            })
        }
    }

    fn sample_records() -> Vec<VerseRecord> {
        vec![
            VerseRecord::new(Theme::Creation, "We created man from clay.", "Surah 15 Ayah 26"),
            VerseRecord::new(Theme::Mercy, "My mercy encompasses all things.", "Surah 7 Ayah 156"),
            VerseRecord::new(Theme::Creation, "We created man from an extract of clay.", "Surah 23 Ayah 12"),
        ]
    }

    #[test]
    fn test_fresh_store_is_not_populated() {
        let store = VerseStore::new(Box::new(BundledDataset));
        assert!(!store.is_populated());
        assert_eq!(store.state(), StoreState::Empty);
        assert!(store.get_verses_by_theme(Theme::Mercy).is_empty());
    }

    #[test]
    fn test_rebuild_populates_store() {
        let mut store = VerseStore::new(Box::new(InMemorySource::new(sample_records())));
        assert!(store.emergency_rebuild());
        assert!(store.is_populated());
        assert_eq!(store.state(), StoreState::Populated);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_buckets_hold_only_their_theme_in_insertion_order() {
        let mut store = VerseStore::new(Box::new(InMemorySource::new(sample_records())));
        store.emergency_rebuild();

        let creation = store.get_verses_by_theme(Theme::Creation);
        assert_eq!(creation.len(), 2);
        assert!(creation.iter().all(|v| v.theme == Theme::Creation));
        assert_eq!(creation[0].reference, "Surah 15 Ayah 26");
        assert_eq!(creation[1].reference, "Surah 23 Ayah 12");

        assert!(store.get_verses_by_theme(Theme::Hell).is_empty());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut once = VerseStore::new(Box::new(BundledDataset));
        assert!(once.emergency_rebuild());

        let mut twice = VerseStore::new(Box::new(BundledDataset));
        assert!(twice.emergency_rebuild());
        assert!(twice.emergency_rebuild());

        for theme in Theme::ALL {
            assert_eq!(
                once.get_verses_by_theme(theme),
                twice.get_verses_by_theme(theme)
            );
        }
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn test_failed_rebuild_enters_failure_state() {
        let mut store = VerseStore::new(Box::new(BrokenSource));
        assert!(!store.emergency_rebuild());
        assert_eq!(store.state(), StoreState::RecoveryFailed);
        assert!(!store.is_populated());

        let mut empty = VerseStore::new(Box::new(InMemorySource::default()));
        assert!(!empty.emergency_rebuild());
        assert_eq!(empty.state(), StoreState::RecoveryFailed);
    }

    #[test]
    fn test_failed_rebuild_keeps_populated_store() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("verses.json");
        fs::write(&path, r#"{ "mercy": ["Surah 7 Ayah 156: My mercy encompasses all things."] }"#)
            .unwrap();

        let mut store = VerseStore::new(Box::new(JsonFileSource::new(&path)));
        assert!(store.emergency_rebuild());
        let before = store.verse_count_by_theme();

        fs::write(&path, "{ broken").unwrap();
        assert!(!store.emergency_rebuild());

        assert!(store.is_populated());
        assert_eq!(store.state(), StoreState::Populated);
        assert_eq!(store.verse_count_by_theme(), before);
        assert_eq!(
            store.get_verses_by_theme(Theme::Mercy)[0].text,
            "My mercy encompasses all things."
        );

        fs::write(&path, r#"{ "mercy": ["   "] }"#).unwrap();
        assert!(!store.emergency_rebuild());
        assert_eq!(store.verse_count_by_theme(), before);
    }

    #[test]
    fn test_populate_skips_malformed_records() {
        let mut store = VerseStore::new(Box::new(InMemorySource::default()));
        let stored = store.populate(vec![
            VerseRecord::new(Theme::Love, "  ", "Surah 30 Ayah 21"),
            VerseRecord::new(Theme::Love, "He is the Affectionate.", "Surah 85 Ayah 14"),
        ]);

        assert_eq!(stored, 1);
        assert_eq!(store.get_verses_by_theme(Theme::Love).len(), 1);
    }

    #[test]
    fn test_verse_count_lists_every_theme() {
        let mut store = VerseStore::new(Box::new(InMemorySource::new(sample_records())));
        store.emergency_rebuild();

        let counts = store.verse_count_by_theme();
        assert_eq!(counts.len(), Theme::ALL.len());
        assert_eq!(counts[&Theme::Creation], 2);
        assert_eq!(counts[&Theme::Mercy], 1);
        assert_eq!(counts[&Theme::Default], 0);
    }
}
