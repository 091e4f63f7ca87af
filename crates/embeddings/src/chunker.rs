/// One bounded-size slice of a document, ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    pub chunk_id: usize,
    pub content: String,
}

/// Chunk sizing in whitespace tokens. The defaults approximate the 1500
/// character windows the document corpus was originally indexed with.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    pub chunk_size: usize,
    pub overlap_size: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 300,
            overlap_size: 50,
        }
    }
}

/// Splits normalized document text into fixed-size overlapping chunks.
pub struct TextChunker {
    config: ChunkConfig,
}

impl TextChunker {
    pub fn new(config: ChunkConfig) -> Self {
        // A degenerate overlap would loop forever; clamp it below the window.
        let overlap_size = config.overlap_size.min(config.chunk_size.saturating_sub(1));
        Self {
            config: ChunkConfig {
                chunk_size: config.chunk_size.max(1),
                overlap_size,
            },
        }
    }

    pub fn chunk_text(&self, text: &str) -> Vec<TextChunk> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return vec![];
        }

        if tokens.len() <= self.config.chunk_size {
            return vec![TextChunk {
                chunk_id: 0,
                content: text.trim().to_string(),
            }];
        }

        let step = self.config.chunk_size - self.config.overlap_size;
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < tokens.len() {
            let end = (start + self.config.chunk_size).min(tokens.len());
            chunks.push(TextChunk {
                chunk_id: chunks.len(),
                content: tokens[start..end].join(" "),
            });

            if end == tokens.len() {
                break;
            }
            start += step;
        }

        chunks
    }
}
