pub mod models;
pub mod openai;
pub mod prompt;

pub use models::{ChatMessage, ModelConfig};
pub use openai::OpenAiChatClient;
pub use prompt::PromptTemplate;
