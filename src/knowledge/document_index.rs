// file: src/knowledge/document_index.rs
// description: load-once TF-IDF index with cosine-similarity search
// reference: term-frequency / inverse-document-frequency vector space model

use crate::knowledge::tokenizer;
use crate::models::{DocumentRecord, SearchResult};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct DocumentIndex {
    documents: Vec<DocumentRecord>,
    document_frequency: HashMap<String, u32>,
    /// Euclidean norm of each document's TF-IDF vector, parallel to `documents`.
    norms: Vec<f32>,
}

impl DocumentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection and recomputes every table.
    ///
    /// Blank documents and repeated content are dropped. Returns the number
    /// of indexed documents.
    pub fn load(&mut self, documents: Vec<DocumentRecord>) -> usize {
        self.documents.clear();
        self.document_frequency.clear();
        self.norms.clear();

        let mut seen_hashes = HashSet::new();

        for mut document in documents {
            if document.is_blank() {
                warn!("Skipping blank document {}", document.id);
                continue;
            }

            if !seen_hashes.insert(document.content_hash.clone()) {
                warn!("Skipping duplicate document {}", document.id);
                continue;
            }

            document.term_counts = tokenizer::term_counts(&document.text);
            for term in document.term_counts.keys() {
                *self.document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
            self.documents.push(document);
        }

        self.norms = self
            .documents
            .iter()
            .map(|document| {
                document
                    .term_counts
                    .iter()
                    .map(|(term, &count)| {
                        let weight = count as f32 * self.idf(term);
                        weight * weight
                    })
                    .sum::<f32>()
                    .sqrt()
            })
            .collect();

        info!(
            "Indexed {} documents ({} distinct terms)",
            self.documents.len(),
            self.document_frequency.len()
        );
        self.documents.len()
    }

    pub fn document_frequency(&self, term: &str) -> u32 {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// Smoothed inverse document frequency: `ln((1 + N) / (1 + df)) + 1`.
    /// The unsmoothed `ln(N / (1 + df))` is negative for small collections
    /// (N = 2, df = 2), which would rank a document higher for containing a
    /// query term fewer times.
    pub fn idf(&self, term: &str) -> f32 {
        let total = self.documents.len() as f32;
        let df = self.document_frequency(term) as f32;
        ((1.0 + total) / (1.0 + df)).ln() + 1.0
    }

    /// Up to `top_k` documents sharing at least one term with `query`,
    /// best first. Equal scores keep collection order.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchResult<'_>> {
        if top_k == 0 || self.documents.is_empty() {
            return Vec::new();
        }

        let query_counts = tokenizer::term_counts(query);
        let query_weights: Vec<(&str, f32)> = query_counts
            .iter()
            .filter(|(term, _)| self.document_frequency(term) > 0)
            .map(|(term, &count)| (term.as_str(), count as f32 * self.idf(term)))
            .collect();

        if query_weights.is_empty() {
            debug!("No indexed term in query '{}'", query);
            return Vec::new();
        }

        let query_norm = query_weights
            .iter()
            .map(|(_, w)| w * w)
            .sum::<f32>()
            .sqrt();

        let mut results: Vec<SearchResult<'_>> = self
            .documents
            .iter()
            .zip(&self.norms)
            .filter_map(|(document, &norm)| {
                let dot: f32 = query_weights
                    .iter()
                    .map(|&(term, query_weight)| {
                        document.term_count(term) as f32 * self.idf(term) * query_weight
                    })
                    .sum();

                if dot <= 0.0 || norm == 0.0 {
                    return None;
                }

                Some(SearchResult {
                    document,
                    score: dot / (norm * query_norm),
                })
            })
            .collect();

        // sort_by is stable, so ties stay in collection order
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);
        results
    }

    pub fn best_match(&self, query: &str) -> Option<SearchResult<'_>> {
        self.search(query, 1).into_iter().next()
    }

    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }
}
