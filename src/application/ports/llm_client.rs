use std::fmt;

use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmClientError>;
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPurpose {
    ModuleDetection,
    QuestionGeneration,
    ConnectionCheck,
}

impl fmt::Display for CompletionPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompletionPurpose::ModuleDetection => "module_detection",
            CompletionPurpose::QuestionGeneration => "question_generation",
            CompletionPurpose::ConnectionCheck => "connection_check",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub purpose: CompletionPurpose,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: usize,
}

impl CompletionRequest {
    pub fn connection_check() -> Self {
        Self {
            purpose: CompletionPurpose::ConnectionCheck,
            messages: vec![ChatMessage::user("Test")],
            temperature: 0.0,
            max_tokens: 5,
        }
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("API request failed: {0}")]
    ApiRequestFailed(String),
    #[error("API quota exceeded. Please add credits to your OpenAI account and try again.")]
    RateLimited,
    #[error("Invalid API key. Please check your OpenAI API key configuration.")]
    Unauthorized,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("client configuration: {0}")]
    Configuration(String),
}
