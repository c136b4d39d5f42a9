//! OpenAI-compatible chat completions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{ChatMessage, LanguageConfig, LanguageService, LanguageServiceError, MessageRole};

pub struct OpenAiLanguageService {
    client: Client,
    api_key: Option<String>,
    config: LanguageConfig,
}

impl OpenAiLanguageService {
    /// Create a client, reading the API key from `config.api_key_env`
    pub fn new(config: LanguageConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_some() {
            tracing::info!("Language service initialized with model {}", config.model);
        } else {
            tracing::warn!(
                "Language service created without API key - {} env var not found",
                config.api_key_env
            );
        }

        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: LanguageConfig, api_key: Option<String>) -> Self {
        Self {
            client: build_client(config.timeout_secs),
            api_key,
            config,
        }
    }

    fn message_to_openai(msg: &ChatMessage) -> serde_json::Value {
        let role = match msg.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
        };

        serde_json::json!({
            "role": role,
            "content": msg.content
        })
    }

    fn build_payload(&self, system_instruction: &str, turns: &[ChatMessage]) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = std::iter::once(ChatMessage::system(system_instruction))
            .chain(turns.iter().cloned())
            .map(|m| Self::message_to_openai(&m))
            .collect();

        serde_json::json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "messages": messages
        })
    }

    fn parse_response(json: &serde_json::Value) -> Result<String, LanguageServiceError> {
        let message = json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .ok_or_else(|| LanguageServiceError::ParseError("missing choices[0].message".into()))?;

        let content = message["content"].as_str().unwrap_or("").trim().to_string();
        if content.is_empty() {
            return Err(LanguageServiceError::EmptyResponse);
        }
        Ok(content)
    }
}

fn build_client(timeout_secs: Option<u64>) -> Client {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default HTTP client: {}", e);
        Client::new()
    })
}

#[async_trait]
impl LanguageService for OpenAiLanguageService {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(
        &self,
        system_instruction: &str,
        turns: &[ChatMessage],
    ) -> Result<String, LanguageServiceError> {
        let auth_header = self
            .api_key
            .as_ref()
            .map(|k| format!("Bearer {}", k))
            .ok_or_else(|| {
                LanguageServiceError::NotConfigured(format!("{} is not set", self.config.api_key_env))
            })?;

        let payload = self.build_payload(system_instruction, turns);

        tracing::debug!(
            "[OpenAI] Sending request: model={}, turns={}",
            self.config.model,
            turns.len()
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", auth_header)
            .json(&payload)
            .send()
            .await
            .map_err(|e| LanguageServiceError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 429 {
                return Err(LanguageServiceError::RateLimited);
            }

            let body = response.text().await.unwrap_or_default();
            return Err(LanguageServiceError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LanguageServiceError::ParseError(e.to_string()))?;

        Self::parse_response(&json)
    }
}
