use anyhow::{Context, Result};
use log::warn;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OpenAiEmbeddingConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for OpenAiEmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "text-embedding-ada-002".to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    input: Vec<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

pub struct OpenAiEmbeddingClient {
    config: OpenAiEmbeddingConfig,
    client: Client,
}

impl OpenAiEmbeddingClient {
    pub fn new(config: OpenAiEmbeddingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    /// ada-002 vectors are always 1536 wide.
    pub fn dimension(&self) -> usize {
        1536
    }

    pub async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.try_embed(&texts).await {
                Ok(embeddings) => return Ok(embeddings),
                Err(e) => {
                    if attempt < self.config.max_retries {
                        warn!(
                            "Embedding request failed (attempt {}): {:#}",
                            attempt + 1,
                            e
                        );
                        let delay = Duration::from_millis(1000 * (2_u64.pow(attempt)));
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap())
    }

    async fn try_embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingRequest {
            input: texts.to_vec(),
            model: self.config.model.clone(),
        };

        let response = self
            .client
            .post(format!("{}/v1/embeddings", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to OpenAI embeddings API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "OpenAI embeddings API returned error {}: {}",
                status,
                error_text
            ));
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI embeddings response")?;

        // The API preserves input order, but `index` is authoritative.
        let mut data = embedding_response.data;
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_client_with_default_config() {
        let config = OpenAiEmbeddingConfig::default();
        let client = OpenAiEmbeddingClient::new(config).unwrap();

        assert_eq!(client.config.model, "text-embedding-ada-002");
        assert_eq!(client.config.base_url, "https://api.openai.com");
        assert_eq!(client.config.timeout_secs, 30);
        assert_eq!(client.dimension(), 1536);
    }

    #[tokio::test]
    async fn should_return_empty_embeddings_for_empty_input() {
        let client = OpenAiEmbeddingClient::new(OpenAiEmbeddingConfig::default()).unwrap();

        let result = client.embed(vec![]).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn should_fail_against_unreachable_endpoint() {
        let config = OpenAiEmbeddingConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 1,
            max_retries: 0,
            ..OpenAiEmbeddingConfig::default()
        };
        let client = OpenAiEmbeddingClient::new(config).unwrap();

        let result = client.embed(vec!["hello".to_string()]).await;
        assert!(result.is_err());
    }

    #[test]
    fn should_serialize_request_with_input_and_model() {
        let request = EmbeddingRequest {
            input: vec!["career advice".to_string()],
            model: "text-embedding-ada-002".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"input\""));
        assert!(json.contains("career advice"));
        assert!(json.contains("text-embedding-ada-002"));
    }

    #[test]
    fn should_order_response_data_by_index() {
        let json = r#"{"data":[
            {"embedding":[0.2],"index":1},
            {"embedding":[0.1],"index":0}
        ]}"#;
        let mut response: EmbeddingResponse = serde_json::from_str(json).unwrap();
        response.data.sort_by_key(|d| d.index);

        assert_eq!(response.data[0].embedding, vec![0.1]);
        assert_eq!(response.data[1].embedding, vec![0.2]);
    }
}
