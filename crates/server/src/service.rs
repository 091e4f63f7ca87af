use crate::config::Config;
use anyhow::{Context, Result};
use embeddings::{create_embedding_provider, ChunkConfig, EmbeddingProvider, TextChunker};
use llm::{ChatMessage, ModelConfig, OpenAiChatClient, PromptTemplate};
use log::info;
use std::path::Path;
use std::sync::Arc;
use store::{IndexEntry, VectorIndex};

type EmbeddingClient = Box<dyn EmbeddingProvider>;

/// Wires ingestion, the vector index, and the hosted model into the
/// per-request retrieval + generation pipeline. The index is loaded or
/// built during construction, before the server accepts any request.
pub struct RagService {
    config: Config,
    embeddings_client: EmbeddingClient,
    index: Arc<VectorIndex>,
    llm_client: OpenAiChatClient,
    prompt: PromptTemplate,
}

impl std::fmt::Debug for RagService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagService")
            .field("config", &self.config)
            .field("embeddings_client", &"EmbeddingClient<...>")
            .field("index_entries", &self.index.len())
            .field("llm_client", &"OpenAiChatClient<...>")
            .finish()
    }
}

impl RagService {
    pub async fn new(config: Config) -> Result<Self> {
        let embeddings_client: EmbeddingClient = create_embedding_provider(&config.embedding)
            .context("Failed to create embedding provider")?;

        let index = Self::load_or_build_index(&config, embeddings_client.as_ref()).await?;

        let model_config = ModelConfig {
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
            ..ModelConfig::default()
        };
        let llm_client =
            OpenAiChatClient::from_env(model_config).context("Failed to create chat client")?;

        Ok(Self {
            config,
            embeddings_client,
            index: Arc::new(index),
            llm_client,
            prompt: PromptTemplate::career_counselor(),
        })
    }

    /// Dependency-injection friendly constructor for testing and composition.
    pub fn with_components(
        config: Config,
        embeddings_client: EmbeddingClient,
        index: Arc<VectorIndex>,
        llm_client: OpenAiChatClient,
    ) -> Self {
        Self {
            config,
            embeddings_client,
            index,
            llm_client,
            prompt: PromptTemplate::career_counselor(),
        }
    }

    /// Loads a previously persisted index wholesale, or ingests the document
    /// directory, chunks, embeds, builds, and persists a fresh one.
    async fn load_or_build_index(
        config: &Config,
        provider: &dyn EmbeddingProvider,
    ) -> Result<VectorIndex> {
        let index_path = Path::new(&config.index.path);

        if index_path.exists() {
            info!("Loading existing vector index from {}", index_path.display());
            return VectorIndex::load(index_path);
        }

        info!(
            "No vector index at {}, building from {}",
            index_path.display(),
            config.data.document_dir
        );

        let documents = ingest::load_documents(Path::new(&config.data.document_dir))
            .await
            .context("Failed to load documents")?;
        info!("Loaded {} documents", documents.len());

        let chunker = TextChunker::new(ChunkConfig::default());
        let mut entries = Vec::new();

        for document in documents {
            let chunks = chunker.chunk_text(&document.content);
            if chunks.is_empty() {
                continue;
            }

            let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
            let vectors = provider
                .embed(texts)
                .await
                .with_context(|| format!("Failed to embed chunks of {}", document.file_name))?;

            if vectors.len() != chunks.len() {
                anyhow::bail!(
                    "Embedding count mismatch for {}: {} chunks, {} vectors",
                    document.file_name,
                    chunks.len(),
                    vectors.len()
                );
            }

            for (chunk, embedding) in chunks.into_iter().zip(vectors) {
                entries.push(IndexEntry::new(
                    document.file_name.clone(),
                    chunk.chunk_id,
                    chunk.content,
                    embedding,
                ));
            }
        }

        let index = VectorIndex::build(entries)
            .context("Failed to build vector index from ingested documents")?;
        index.save(index_path)?;
        info!("Vector index built and saved ({} entries)", index.len());

        Ok(index)
    }

    /// Runs the full query pipeline: embed, retrieve top-k, stuff the
    /// retrieved chunks into the prompt, and ask the chat model.
    pub async fn answer(&self, user_input: &str) -> Result<String> {
        let query_embedding = self
            .embeddings_client
            .embed(vec![user_input.to_string()])
            .await
            .context("Failed to embed query")?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Embedding provider returned no vector for query"))?;

        let results = self
            .index
            .search(&query_embedding, self.config.retrieval.top_k)
            .context("Vector search failed")?;

        let context = results
            .iter()
            .map(|r| r.entry.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt_text = self.prompt.render(&context, user_input);

        self.llm_client
            .complete(vec![ChatMessage::user(prompt_text)])
            .await
            .context("Chat completion failed")
    }

    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    pub fn static_dir(&self) -> &str {
        &self.config.server.static_dir
    }
}
