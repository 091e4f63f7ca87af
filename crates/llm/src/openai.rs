use crate::models::{ChatMessage, CompletionRequest, CompletionResponse, ModelConfig};
use anyhow::{Context, Result};
use log::warn;
use reqwest::Client;
use std::time::Duration;

/// Non-streaming client for the OpenAI chat completions API.
pub struct OpenAiChatClient {
    config: ModelConfig,
    api_key: String,
    client: Client,
}

impl OpenAiChatClient {
    pub fn new(config: ModelConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Reads the API key from `OPENAI_API_KEY`.
    pub fn from_env(config: ModelConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        Self::new(config, api_key)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Sends the conversation and returns the model's reply text.
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.try_complete(&messages).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    if attempt < self.config.max_retries {
                        warn!("Chat completion failed (attempt {}): {:#}", attempt + 1, e);
                        let delay = Duration::from_millis(1000 * (2_u64.pow(attempt)));
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap())
    }

    async fn try_complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = CompletionRequest::new(messages.to_vec(), &self.config);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to OpenAI chat API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "OpenAI chat API returned error {}: {}",
                status,
                error_text
            ));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI chat response")?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("OpenAI chat response contained no choices"))?;

        Ok(choice.message.content)
    }
}
