use thiserror::Error;

/// Internal error taxonomy for logging. The HTTP boundary always collapses
/// failures into a single generic 500 response; these kinds only shape the
/// server-side log line.
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Document ingestion error: {0}")]
    IngestError(String),

    #[error("Embedding service error: {0}")]
    EmbeddingError(String),

    #[error("Vector index error: {0}")]
    IndexError(String),

    #[error("LLM service error: {0}")]
    LlmError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid request: {0}")]
    ValidationError(String),
}

impl RagError {
    /// Best-effort classification of a pipeline failure from its message.
    pub fn classify(error: &anyhow::Error) -> Self {
        let text = format!("{:#}", error);
        let lower = text.to_lowercase();

        if lower.contains("embed") {
            RagError::EmbeddingError(text)
        } else if lower.contains("chat") || lower.contains("completion") {
            RagError::LlmError(text)
        } else if lower.contains("index") || lower.contains("search") {
            RagError::IndexError(text)
        } else if lower.contains("document") || lower.contains("parse") {
            RagError::IngestError(text)
        } else if lower.contains("config") {
            RagError::ConfigError(text)
        } else {
            RagError::ValidationError(text)
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            RagError::IngestError(_) => 500,
            RagError::EmbeddingError(_) => 500,
            RagError::IndexError(_) => 500,
            RagError::LlmError(_) => 503,
            RagError::ConfigError(_) => 500,
            RagError::ValidationError(_) => 400,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            RagError::IngestError(_) => false,
            RagError::EmbeddingError(_) => true,
            RagError::IndexError(_) => false,
            RagError::LlmError(_) => true,
            RagError::ConfigError(_) => false,
            RagError::ValidationError(_) => false,
        }
    }
}
