use anyhow::Result;

/// Offline embedding provider producing deterministic pseudo-embeddings.
/// Used in tests and local development when no API key is available.
pub struct FallbackEmbeddingProvider {
    embedding_dim: usize,
}

impl FallbackEmbeddingProvider {
    pub fn new(embedding_dim: usize) -> Self {
        Self { embedding_dim }
    }

    /// Matches the width of OpenAI's ada-002 vectors so fallback-built
    /// indexes stay dimension-compatible with real ones.
    pub fn with_openai_dimension() -> Self {
        Self::new(1536)
    }

    pub fn embedding_dimension(&self) -> usize {
        self.embedding_dim
    }

    /// Embeds each text as a cheap byte-histogram projection. Identical
    /// inputs always embed identically; distinct inputs almost never collide.
    pub async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let embeddings = texts
            .iter()
            .map(|text| self.pseudo_embedding(text))
            .collect();
        Ok(embeddings)
    }

    fn pseudo_embedding(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.embedding_dim];
        if self.embedding_dim == 0 {
            return embedding;
        }

        for (pos, byte) in text.bytes().enumerate() {
            let slot = (pos + byte as usize) % self.embedding_dim;
            embedding[slot] += (byte as f32) / 255.0;
        }

        // Give empty input a non-zero vector so cosine scores stay defined
        if text.is_empty() {
            embedding[0] = 1.0;
        }

        embedding
    }
}
