// file: src/knowledge/loader.rs
// description: reads document collections from a JSON file or a directory tree
// reference: https://docs.rs/walkdir

use crate::error::{EngineError, Result};
use crate::models::DocumentRecord;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const DOCUMENT_EXTENSIONS: [&str; 3] = ["txt", "md", "markdown"];

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "content")]
    text: Option<String>,
}

pub struct DocumentLoader;

impl DocumentLoader {
    /// Loads `[{ "id"?, "title"?, "text" | "content" }, ...]`.
    /// Entries without text are skipped.
    pub fn load_from_json(path: &Path) -> Result<Vec<DocumentRecord>> {
        let raw = fs::read_to_string(path).map_err(|source| EngineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_json(&path.display().to_string(), &raw)
    }

    pub fn parse_json(source_name: &str, raw: &str) -> Result<Vec<DocumentRecord>> {
        let entries: Vec<RawDocument> =
            serde_json::from_str(raw).map_err(|e| EngineError::Dataset {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;

        let mut documents = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            match entry.text {
                Some(text) if !text.trim().is_empty() => {
                    documents.push(DocumentRecord::with_title(
                        entry.id,
                        entry.title.as_deref(),
                        &text,
                    ));
                }
                _ => warn!(
                    "Skipping document #{} in {}: missing text",
                    position, source_name
                ),
            }
        }

        info!("Loaded {} documents from {}", documents.len(), source_name);
        Ok(documents)
    }

    /// Every `.txt`/`.md` file below `root`, keyed by its path relative to `root`.
    /// Sorted by id so repeated loads index the same order.
    pub fn load_from_directory(root: &Path) -> Result<Vec<DocumentRecord>> {
        if !root.is_dir() {
            return Err(EngineError::Validation(format!(
                "Path is not a directory: {}",
                root.display()
            )));
        }

        info!("Scanning document directory: {}", root.display());
        let mut documents = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let is_document = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext.to_lowercase().as_str()));

            if !is_document {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Cannot read {}: {}", path.display(), e);
                    continue;
                }
            };

            if text.trim().is_empty() {
                debug!("Skipping empty file: {}", path.display());
                continue;
            }

            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");

            documents.push(DocumentRecord::new(Some(relative_path), text));
        }

        documents.sort_by(|a, b| a.id.cmp(&b.id));
        info!("Found {} documents", documents.len());
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_json_accepts_text_or_content() {
        let raw = r#"[
            { "id": "a", "text": "Clay hardens in fire." },
            { "content": "Rivers carry silt.", "title": "Rivers" },
            { "id": "empty", "text": "  " },
            { "id": "missing" }
        ]"#;

        let documents = DocumentLoader::parse_json("test", raw).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, "a");
        assert!(documents[1].text.starts_with("Rivers\n\n"));
        assert_eq!(documents[1].id.len(), 12);
    }

    #[test]
    fn test_parse_json_rejects_non_array() {
        let err = DocumentLoader::parse_json("test", r#"{ "id": "a" }"#).unwrap_err();
        assert!(matches!(err, EngineError::Dataset { .. }));
    }

    #[test]
    fn test_load_from_json_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("documents.json");
        fs::write(&path, r#"[{ "id": "kiln", "text": "A kiln fires pottery." }]"#).unwrap();

        let documents = DocumentLoader::load_from_json(&path).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, "kiln");

        assert!(DocumentLoader::load_from_json(&temp.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_load_from_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("b.txt"), "Second document").unwrap();
        fs::write(temp.path().join("nested/a.md"), "# Nested\nFirst document").unwrap();
        fs::write(temp.path().join("image.png"), "not text").unwrap();
        fs::write(temp.path().join("blank.txt"), "\n\n").unwrap();

        let documents = DocumentLoader::load_from_directory(temp.path()).unwrap();
        let ids: Vec<&str> = documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b.txt", "nested/a.md"]);
    }

    #[test]
    fn test_load_from_missing_directory() {
        let temp = TempDir::new().unwrap();
        assert!(DocumentLoader::load_from_directory(&temp.path().join("missing")).is_err());
    }
}
