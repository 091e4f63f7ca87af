use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: String) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }

    pub fn assistant(content: String) -> Self {
        Self {
            role: "assistant".to_string(),
            content,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo-16k".to_string(),
            // Deterministic generation for repeatable advice
            temperature: 0.0,
            max_tokens: 1024,
            base_url: "https://api.openai.com".to_string(),
            timeout_secs: 60,
            max_retries: 1,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>, config: &ModelConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            messages,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_user_message() {
        let msg = ChatMessage::user("Which colleges can I apply to?".to_string());
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content, "Which colleges can I apply to?");
    }

    #[test]
    fn should_create_assistant_message() {
        let msg = ChatMessage::assistant("Consider NED or FAST.".to_string());
        assert_eq!(msg.role, "assistant");
    }

    #[test]
    fn should_default_to_deterministic_chat_model() {
        let config = ModelConfig::default();

        assert_eq!(config.model, "gpt-3.5-turbo-16k");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.base_url, "https://api.openai.com");
    }

    #[test]
    fn should_build_completion_request_from_config() {
        let config = ModelConfig::default();
        let messages = vec![ChatMessage::user("question".to_string())];
        let request = CompletionRequest::new(messages.clone(), &config);

        assert_eq!(request.model, "gpt-3.5-turbo-16k");
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.messages, messages);
    }

    #[test]
    fn should_serialize_request_with_temperature_zero() {
        let request =
            CompletionRequest::new(vec![ChatMessage::user("q".to_string())], &ModelConfig::default());

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["model"], "gpt-3.5-turbo-16k");
    }

    #[test]
    fn should_deserialize_completion_response() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Dear, considering your situation..."}}
            ]
        }"#;

        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert!(response.choices[0].message.content.starts_with("Dear"));
    }
}
