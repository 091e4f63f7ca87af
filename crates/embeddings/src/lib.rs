pub mod chunker;
pub mod config;
pub mod fallback;
pub mod openai;

pub use chunker::{ChunkConfig, TextChunk, TextChunker};
pub use config::EmbeddingConfig;
pub use fallback::FallbackEmbeddingProvider;
pub use openai::{OpenAiEmbeddingClient, OpenAiEmbeddingConfig};

use anyhow::Result;

type EmbedFuture<'a> =
    std::pin::Pin<Box<dyn std::future::Future<Output = Result<Vec<Vec<f32>>>> + Send + 'a>>;

pub trait EmbeddingProvider: Send + Sync {
    fn embed(&self, texts: Vec<String>) -> EmbedFuture<'_>;
    fn dimension(&self) -> usize;
}

impl EmbeddingProvider for OpenAiEmbeddingClient {
    fn embed(&self, texts: Vec<String>) -> EmbedFuture<'_> {
        Box::pin(self.embed(texts))
    }
    fn dimension(&self) -> usize {
        self.dimension()
    }
}

impl EmbeddingProvider for FallbackEmbeddingProvider {
    fn embed(&self, texts: Vec<String>) -> EmbedFuture<'_> {
        Box::pin(self.embed(texts))
    }
    fn dimension(&self) -> usize {
        self.embedding_dimension()
    }
}

/// Resolves the configured provider name to a concrete embedding client.
/// Anything other than "openai" yields the deterministic offline fallback,
/// which keeps development and tests free of API calls.
pub fn create_embedding_provider(cfg: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    match cfg.provider.as_str() {
        "openai" => {
            let openai_cfg = OpenAiEmbeddingConfig {
                api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
                model: cfg
                    .model
                    .clone()
                    .unwrap_or_else(|| OpenAiEmbeddingConfig::default().model),
                ..OpenAiEmbeddingConfig::default()
            };
            Ok(Box::new(OpenAiEmbeddingClient::new(openai_cfg)?))
        }
        _ => {
            let dimensions = cfg.dimensions.unwrap_or(1536);
            Ok(Box::new(FallbackEmbeddingProvider::new(dimensions)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_openai_provider_from_config() {
        let cfg = EmbeddingConfig {
            provider: "openai".to_string(),
            model: Some("text-embedding-ada-002".to_string()),
            dimensions: None,
        };

        let provider = create_embedding_provider(&cfg).unwrap();
        assert_eq!(provider.dimension(), 1536);
    }

    #[test]
    fn should_fall_back_for_unknown_provider() {
        let cfg = EmbeddingConfig {
            provider: "fallback".to_string(),
            model: None,
            dimensions: Some(8),
        };

        let provider = create_embedding_provider(&cfg).unwrap();
        assert_eq!(provider.dimension(), 8);
    }
}
