use serde::{Deserialize, Serialize};

/// One indexed chunk of a source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub file_name: String,
    pub chunk_id: usize,
    pub content: String,
    pub embedding: Vec<f32>,
}

impl IndexEntry {
    pub fn new(file_name: String, chunk_id: usize, content: String, embedding: Vec<f32>) -> Self {
        Self {
            file_name,
            chunk_id,
            content,
            embedding,
        }
    }
}

/// A retrieved entry together with its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub entry: IndexEntry,
    pub score: f32,
}

impl SearchResult {
    pub fn new(entry: IndexEntry, score: f32) -> Self {
        Self { entry, score }
    }
}
