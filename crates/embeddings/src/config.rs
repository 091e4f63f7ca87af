use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: Option<String>,
    pub dimensions: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_round_trip_full_config() {
        let config = EmbeddingConfig {
            provider: "openai".to_string(),
            model: Some("text-embedding-ada-002".to_string()),
            dimensions: Some(1536),
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: EmbeddingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn should_round_trip_minimal_config() {
        let config = EmbeddingConfig {
            provider: "fallback".to_string(),
            model: None,
            dimensions: None,
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: EmbeddingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
