use crate::models::{IndexEntry, SearchResult};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk layout of a persisted index. The file is loaded wholesale and
/// its contents are trusted as-is.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedIndex {
    dimension: usize,
    built_at: DateTime<Utc>,
    entries: Vec<IndexEntry>,
}

/// Brute-force cosine similarity index over embedded document chunks.
///
/// The index is immutable once built: it is either loaded from disk or
/// constructed from freshly embedded chunks before the server starts
/// accepting requests.
#[derive(Debug)]
pub struct VectorIndex {
    dimension: usize,
    built_at: DateTime<Utc>,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Builds an index from embedded entries. All embeddings must share
    /// the same dimension.
    pub fn build(entries: Vec<IndexEntry>) -> Result<Self> {
        let dimension = entries
            .first()
            .map(|e| e.embedding.len())
            .ok_or_else(|| anyhow::anyhow!("Cannot build an index from zero entries"))?;

        for entry in &entries {
            if entry.embedding.len() != dimension {
                anyhow::bail!(
                    "Inconsistent embedding dimensions: {} chunk {} has {} values, expected {}",
                    entry.file_name,
                    entry.chunk_id,
                    entry.embedding.len(),
                    dimension
                );
            }
        }

        Ok(Self {
            dimension,
            built_at: Utc::now(),
            entries,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read index file: {}", path.display()))?;
        let persisted: PersistedIndex = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse index file: {}", path.display()))?;

        info!(
            "Loaded vector index from {} ({} entries, built {})",
            path.display(),
            persisted.entries.len(),
            persisted.built_at
        );

        Ok(Self {
            dimension: persisted.dimension,
            built_at: persisted.built_at,
            entries: persisted.entries,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let persisted = PersistedIndex {
            dimension: self.dimension,
            built_at: self.built_at,
            entries: self.entries.clone(),
        };

        let json = serde_json::to_string(&persisted).context("Failed to serialize index")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write index file: {}", path.display()))?;

        info!(
            "Saved vector index to {} ({} entries)",
            path.display(),
            self.entries.len()
        );
        Ok(())
    }

    /// Returns the `k` entries most similar to the query embedding,
    /// sorted by descending cosine similarity.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if query.len() != self.dimension {
            anyhow::bail!(
                "Query embedding has {} dimensions, index was built with {}",
                query.len(),
                self.dimension
            );
        }

        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|entry| SearchResult::new(entry.clone(), cosine_similarity(query, &entry.embedding)))
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(k);
        Ok(results)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
