//! Speech-to-text via an OpenAI-compatible Whisper endpoint

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("Transcription service not configured: {0}")]
    NotConfigured(String),

    #[error("No audio was captured")]
    EmptyAudio,

    #[error("Audio processing error: {0}")]
    Audio(String),

    #[error("WAV encoding error: {0}")]
    Encode(#[from] hound::Error),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Whisper API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Response parse error: {0}")]
    ParseError(String),
}

/// Encoded audio ready for upload.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn wav(bytes: Vec<u8>) -> Self {
        Self::new(bytes, "speech.wav", "audio/wav")
    }
}

/// Speech-to-Text trait
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_configured(&self) -> bool;

    /// Returns the spoken text, trimmed. An empty string means nothing was recognized.
    async fn transcribe(&self, clip: AudioClip) -> Result<String, TranscriptionError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub endpoint: String,
    pub model: String,
    /// ISO-639-1 hint; `None` lets the service detect the language
    pub language: Option<String>,
    pub api_key_env: String,
    pub timeout_secs: Option<u64>,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/audio/transcriptions".to_string(),
            model: "whisper-1".to_string(),
            language: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug)]
pub struct WhisperTranscriber {
    config: TranscriptionConfig,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl WhisperTranscriber {
    pub fn new(config: TranscriptionConfig) -> Self {
        info!("Initializing Whisper transcription with model: {}", config.model);
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!(
                "Whisper transcription created without API key - {} env var not found",
                config.api_key_env
            );
        }
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: TranscriptionConfig, api_key: Option<String>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().unwrap_or_else(|e| {
            warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        });

        Self {
            config,
            api_key,
            client,
        }
    }

    fn parse_response(json: &serde_json::Value) -> Result<String, TranscriptionError> {
        json.get("text")
            .and_then(serde_json::Value::as_str)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| TranscriptionError::ParseError("missing `text` field".into()))
    }
}

#[async_trait]
impl TranscriptionService for WhisperTranscriber {
    fn name(&self) -> &'static str {
        "whisper"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn transcribe(&self, clip: AudioClip) -> Result<String, TranscriptionError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            TranscriptionError::NotConfigured(format!("{} is not set", self.config.api_key_env))
        })?;
        if clip.bytes.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }

        let started = Instant::now();
        let size = clip.bytes.len();
        let part = reqwest::multipart::Part::bytes(clip.bytes)
            .file_name(clip.file_name)
            .mime_str(&clip.mime_type)
            .map_err(|e| TranscriptionError::Audio(format!("Failed to create form part: {}", e)))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("response_format", "json");
        if let Some(language) = &self.config.language {
            form = form.text("language", language.clone());
        }

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;
        let text = Self::parse_response(&json)?;

        debug!(
            bytes = size,
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = text.chars().count(),
            "Whisper transcription finished"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_trims_text() {
        let json = serde_json::json!({"text": "  my printer is offline "});
        assert_eq!(
            WhisperTranscriber::parse_response(&json).unwrap(),
            "my printer is offline"
        );
    }

    #[test]
    fn missing_text_is_a_parse_error() {
        let json = serde_json::json!({"error": {"message": "bad audio"}});
        assert!(matches!(
            WhisperTranscriber::parse_response(&json),
            Err(TranscriptionError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn unconfigured_transcriber_fails_fast() {
        let transcriber = WhisperTranscriber::with_api_key(TranscriptionConfig::default(), None);
        assert!(!transcriber.is_configured());

        let err = transcriber
            .transcribe(AudioClip::wav(vec![1, 2, 3]))
            .await
            .unwrap_err();
        assert!(matches!(err, TranscriptionError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn empty_clip_is_rejected_before_upload() {
        let transcriber =
            WhisperTranscriber::with_api_key(TranscriptionConfig::default(), Some("key".into()));

        let err = transcriber.transcribe(AudioClip::wav(Vec::new())).await.unwrap_err();
        assert!(matches!(err, TranscriptionError::EmptyAudio));
    }
}
