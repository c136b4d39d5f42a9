//! Language service abstraction
//!
//! One opaque text-in/text-out boundary covers every use of the large language
//! model: normalizing free-form input into English, translating display strings,
//! and phrasing grounded troubleshooting explanations.

mod openai;
pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use openai::OpenAiLanguageService;

/// Language every knowledge-base entry is written in.
pub const CANONICAL_LANGUAGE: &str = "English";

/// Whether `language` names the canonical language.
pub fn is_canonical(language: &str) -> bool {
    language.trim().eq_ignore_ascii_case(CANONICAL_LANGUAGE)
}

/// Error type for language service calls
#[derive(Debug, thiserror::Error)]
pub enum LanguageServiceError {
    #[error("Language service not configured: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited by language service")]
    RateLimited,

    #[error("Response parse error: {0}")]
    ParseError(String),

    #[error("Language service returned an empty response")]
    EmptyResponse,
}

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Text-in/text-out completion service.
#[async_trait]
pub trait LanguageService: Send + Sync {
    /// Provider name for logging/display
    fn name(&self) -> &'static str;

    /// Check if this service is configured well enough to attempt calls
    fn is_configured(&self) -> bool;

    /// Completes `turns` under `system_instruction` and returns the reply text.
    async fn complete(
        &self,
        system_instruction: &str,
        turns: &[ChatMessage],
    ) -> Result<String, LanguageServiceError>;
}

/// Configuration for the OpenAI-compatible chat completions client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout; `None` keeps the HTTP client's default
    pub timeout_secs: Option<u64>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 600,
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: None,
        }
    }
}
