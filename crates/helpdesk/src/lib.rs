//! # Helpdesk - Troubleshooting Assistant Core
//!
//! Matches a user's problem description against a troubleshooting knowledge base,
//! walks them through the ranked suggestions one at a time, and localizes the
//! result through a cached language service. Voice input is transcribed first.

pub mod audio;
pub mod config;
pub mod conversation;
pub mod fuzz;
pub mod knowledge;
pub mod language;
pub mod locale;
pub mod matcher;
pub mod orchestrator;
pub mod session;
pub mod storage;
pub mod transcription;
pub mod translation;

use std::sync::Arc;

pub use audio::AudioCapture;
pub use self::config::{ConfigError, DataPaths, HelpdeskConfig};
pub use conversation::{ConversationState, Outcome, Transition};
pub use knowledge::{Entry, JsonKnowledgeBaseStore, KnowledgeBase, KnowledgeBaseStore};
pub use language::{LanguageConfig, LanguageService, LanguageServiceError, OpenAiLanguageService};
pub use locale::UiStrings;
pub use matcher::{Candidate, MatchQuality, MatchSettings, Matcher, SystemFilter};
pub use orchestrator::{
    CandidateView, DialogueOrchestrator, Notice, NoticeKind, Transcript, TurnKind, TurnResponse,
};
pub use session::{SessionContext, SessionSnapshot};
pub use transcription::{
    AudioClip, TranscriptionConfig, TranscriptionError, TranscriptionService, WhisperTranscriber,
};
pub use translation::{CacheStats, JsonTranslationStore, TranslationCache, TranslationStore};

/// Errors surfaced to callers of the orchestrator
#[derive(Debug, thiserror::Error)]
pub enum HelpdeskError {
    #[error("Cannot {action} while the conversation is {state:?}")]
    InvalidAction { action: &'static str, state: Outcome },

    #[error("Query is {length} characters long; the limit is {max}")]
    QueryTooLong { length: usize, max: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, HelpdeskError>;

/// Loads the data files and builds an orchestrator backed by the OpenAI-compatible services.
pub async fn initialize(config: &HelpdeskConfig) -> Result<DialogueOrchestrator> {
    tracing::info!("Initializing helpdesk...");
    config.validate()?;

    let knowledge_base =
        KnowledgeBase::load_from(&JsonKnowledgeBaseStore::new(&config.data.knowledge_base)).await;
    let strings = UiStrings::load(&config.data.ui_strings).await;

    let language: Arc<dyn LanguageService> =
        Arc::new(OpenAiLanguageService::new(config.language.clone()));
    let transcription: Arc<dyn TranscriptionService> =
        Arc::new(WhisperTranscriber::new(config.transcription.clone()));
    let translations = TranslationCache::load(
        language.clone(),
        Arc::new(JsonTranslationStore::new(&config.data.translation_cache)),
    )
    .await;

    let orchestrator = DialogueOrchestrator::new(
        Arc::new(knowledge_base),
        Matcher::new(config.matching),
        Arc::new(translations),
        Arc::new(strings),
        language,
        transcription,
    );

    tracing::info!("Helpdesk initialized successfully");
    Ok(orchestrator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn initialize_survives_missing_data_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = HelpdeskConfig::default();
        config.data = DataPaths {
            knowledge_base: dir.path().join("troubleshooting.json"),
            translation_cache: dir.path().join("translation_cache.json"),
            ui_strings: dir.path().join("translations.json"),
        };

        let orchestrator = initialize(&config).await.unwrap();
        assert!(orchestrator.knowledge_base().is_empty());
        assert_eq!(orchestrator.load_warnings("English").len(), 3);
        assert_eq!(orchestrator.strings().languages(), vec!["English"]);
    }

    #[tokio::test]
    async fn initialize_rejects_invalid_settings() {
        let mut config = HelpdeskConfig::default();
        config.matching.top_k = 0;
        assert!(matches!(
            initialize(&config).await,
            Err(HelpdeskError::Config(ConfigError::Invalid(_)))
        ));
    }
}
