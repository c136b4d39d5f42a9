//! Per-turn coordination of matching, conversation state, translation and explanation.
//!
//! The orchestrator holds shared, read-mostly components; all per-user state lives in
//! the [`SessionContext`] passed into each call. External service failures never
//! escape a turn: they become [`Notice`]s and the turn falls back to untranslated or
//! unexplained text.

use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    audio::AudioCapture,
    conversation::{Outcome, Transition},
    knowledge::KnowledgeBase,
    language::{is_canonical, prompts, LanguageService},
    locale::UiStrings,
    matcher::{Candidate, MatchQuality, Matcher},
    session::SessionContext,
    transcription::{AudioClip, TranscriptionService},
    translation::TranslationCache,
    HelpdeskError, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnKind {
    NoResults,
    Suggestion,
    Resolved,
    Exhausted,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    DataLoad,
    QueryNotTranslated,
    TranslationUnavailable,
    ExplanationUnavailable,
    TranscriptionFailed,
}

impl NoticeKind {
    fn message_key(&self) -> &'static str {
        match self {
            NoticeKind::DataLoad => "data_load_warning",
            NoticeKind::QueryNotTranslated => "query_not_translated",
            NoticeKind::TranslationUnavailable => "translation_unavailable",
            NoticeKind::ExplanationUnavailable => "explanation_unavailable",
            NoticeKind::TranscriptionFailed => "transcription_failed",
        }
    }
}

/// A user-visible warning attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub detail: Option<String>,
}

/// The candidate currently presented, in display form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateView {
    pub system: Option<String>,
    pub problem: String,
    pub first_step: String,
    pub escalation: String,
    pub score: u8,
    pub quality: MatchQuality,
    pub quality_label: String,
    /// 1-based position in the ranked list
    pub position: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub kind: TurnKind,
    pub outcome: Outcome,
    pub message: String,
    pub candidate: Option<CandidateView>,
    pub explanation: Option<String>,
    pub notices: Vec<Notice>,
}

/// Result of a voice capture. `text` is `None` when nothing usable came back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub text: Option<String>,
    pub notices: Vec<Notice>,
}

pub struct DialogueOrchestrator {
    knowledge_base: Arc<KnowledgeBase>,
    matcher: Matcher,
    translations: Arc<TranslationCache>,
    strings: Arc<UiStrings>,
    language: Arc<dyn LanguageService>,
    transcription: Arc<dyn TranscriptionService>,
}

impl DialogueOrchestrator {
    pub fn new(
        knowledge_base: Arc<KnowledgeBase>,
        matcher: Matcher,
        translations: Arc<TranslationCache>,
        strings: Arc<UiStrings>,
        language: Arc<dyn LanguageService>,
        transcription: Arc<dyn TranscriptionService>,
    ) -> Self {
        info!(
            "Dialogue orchestrator ready: {} entries, language service {} (configured: {}), transcription {} (configured: {})",
            knowledge_base.len(),
            language.name(),
            language.is_configured(),
            transcription.name(),
            transcription.is_configured()
        );
        Self {
            knowledge_base,
            matcher,
            translations,
            strings,
            language,
            transcription,
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn translations(&self) -> &TranslationCache {
        &self.translations
    }

    pub fn strings(&self) -> &UiStrings {
        &self.strings
    }

    /// Every UI string resolved for `language`.
    pub fn ui_strings(&self, language: &str) -> BTreeMap<String, String> {
        self.strings.resolve_all(language)
    }

    /// Warnings from startup loading, localized for `language`.
    pub fn load_warnings(&self, language: &str) -> Vec<Notice> {
        [
            self.knowledge_base.load_warning(),
            self.translations.load_warning(),
            self.strings.load_warning(),
        ]
        .into_iter()
        .flatten()
        .map(|detail| self.notice(language, NoticeKind::DataLoad, Some(detail.to_string())))
        .collect()
    }

    /// Ranks `query` for the session and presents the first candidate.
    ///
    /// Any previous candidates are discarded first. Non-English input is normalized
    /// to English before matching; if that fails the raw text is matched. Queries
    /// longer than the matcher's limit are refused before the session is touched.
    pub async fn submit_query(
        &self,
        session: &mut SessionContext,
        query: &str,
    ) -> Result<TurnResponse> {
        let length = query.trim().chars().count();
        let max = self.matcher.max_query_chars();
        if length > max {
            return Err(HelpdeskError::QueryTooLong { length, max });
        }

        if session.conversation().outcome() != Outcome::AwaitingQuery {
            session.reset();
        }

        let mut notices = Vec::new();
        let normalized = self
            .normalize_query(session.language(), query, &mut notices)
            .await;
        let system_filter = session.system_filter().clone();

        let transition = session.conversation_mut().submit_query(
            &normalized,
            system_filter,
            &self.matcher,
            &self.knowledge_base,
        );
        session.set_last_query(Some(query.trim().to_string()));
        debug!("Query {:?} (matched as {:?}) -> {:?}", query, normalized, transition);

        Ok(self.finish_turn(session, transition, notices).await)
    }

    pub async fn confirm_resolved(&self, session: &mut SessionContext) -> Result<TurnResponse> {
        Self::require_feedback(session, "confirm_resolved")?;
        let transition = session.conversation_mut().confirm_resolved();
        Ok(self.finish_turn(session, transition, Vec::new()).await)
    }

    /// Moves to the next ranked candidate, or to `Exhausted` after the last one.
    pub async fn reject_current(&self, session: &mut SessionContext) -> Result<TurnResponse> {
        Self::require_feedback(session, "reject_current")?;
        let transition = session.conversation_mut().reject_current();
        Ok(self.finish_turn(session, transition, Vec::new()).await)
    }

    pub fn reset(&self, session: &mut SessionContext) -> TurnResponse {
        session.reset();
        TurnResponse {
            kind: TurnKind::Reset,
            outcome: session.conversation().outcome(),
            message: self.strings.resolve(session.language(), "describe_issue"),
            candidate: None,
            explanation: None,
            notices: Vec::new(),
        }
    }

    /// Transcribes an encoded clip. Failures become a notice, never an error.
    pub async fn transcribe(&self, session: &SessionContext, clip: AudioClip) -> Transcript {
        let language = session.language();
        match self.transcription.transcribe(clip).await {
            Ok(text) if !text.trim().is_empty() => {
                info!("Transcribed {} chars of speech", text.chars().count());
                Transcript {
                    text: Some(text),
                    notices: Vec::new(),
                }
            }
            Ok(_) => {
                warn!("Transcription returned no text");
                Transcript {
                    text: None,
                    notices: vec![self.notice(
                        language,
                        NoticeKind::TranscriptionFailed,
                        Some("no speech recognized".to_string()),
                    )],
                }
            }
            Err(err) => {
                warn!("Transcription failed: {}", err);
                Transcript {
                    text: None,
                    notices: vec![self.notice(
                        language,
                        NoticeKind::TranscriptionFailed,
                        Some(err.to_string()),
                    )],
                }
            }
        }
    }

    /// Encodes captured PCM frames and transcribes them.
    pub async fn transcribe_capture(&self, session: &SessionContext, capture: AudioCapture) -> Transcript {
        match capture.into_clip() {
            Ok(clip) => self.transcribe(session, clip).await,
            Err(err) => {
                warn!("Audio capture could not be encoded: {}", err);
                Transcript {
                    text: None,
                    notices: vec![self.notice(
                        session.language(),
                        NoticeKind::TranscriptionFailed,
                        Some(err.to_string()),
                    )],
                }
            }
        }
    }

    /// Writes new translations to their store. Failures are logged only.
    pub async fn persist_translations(&self) {
        if !self.translations.is_dirty() {
            return;
        }
        match self.translations.flush().await {
            Ok(count) => debug!("Persisted {} translation(s)", count),
            Err(err) => warn!("Translation cache not persisted: {}", err),
        }
    }

    fn require_feedback(session: &SessionContext, action: &'static str) -> Result<()> {
        let conversation = session.conversation();
        if conversation.is_awaiting_feedback() {
            Ok(())
        } else {
            Err(HelpdeskError::InvalidAction {
                action,
                state: conversation.outcome(),
            })
        }
    }

    async fn normalize_query(&self, language: &str, query: &str, notices: &mut Vec<Notice>) -> String {
        let query = query.trim();
        if query.is_empty() || is_canonical(language) {
            return query.to_string();
        }

        let prompt = prompts::normalize_query(language, query);
        match self.language.complete(&prompt.system, &prompt.turns).await {
            Ok(normalized) => normalized,
            Err(err) => {
                warn!("Query normalization from {} failed, matching raw text: {}", language, err);
                notices.push(self.notice(language, NoticeKind::QueryNotTranslated, Some(err.to_string())));
                query.to_string()
            }
        }
    }

    async fn finish_turn(
        &self,
        session: &SessionContext,
        transition: Transition,
        mut notices: Vec<Notice>,
    ) -> TurnResponse {
        let language = session.language();
        let (kind, message_key) = match transition {
            Transition::NoResults => (TurnKind::NoResults, "no_results"),
            Transition::Present { .. } => (TurnKind::Suggestion, "did_this_help"),
            Transition::Resolved => (TurnKind::Resolved, "resolved"),
            Transition::Exhausted => (TurnKind::Exhausted, "exhausted"),
        };

        let (candidate, explanation) = match transition {
            Transition::Present { index } => {
                let candidates = session.conversation().candidates();
                let current = &candidates[index];
                let view = self
                    .candidate_view(language, current, index, candidates.len(), &mut notices)
                    .await;
                let explanation = self
                    .explain(language, current, session.last_query().unwrap_or_default(), &mut notices)
                    .await;
                (Some(view), explanation)
            }
            _ => (None, None),
        };

        self.persist_translations().await;

        TurnResponse {
            kind,
            outcome: session.conversation().outcome(),
            message: self.strings.resolve(language, message_key),
            candidate,
            explanation,
            notices,
        }
    }

    async fn candidate_view(
        &self,
        language: &str,
        candidate: &Candidate,
        index: usize,
        total: usize,
        notices: &mut Vec<Notice>,
    ) -> CandidateView {
        let entry = &candidate.entry;
        let quality = candidate.quality();

        CandidateView {
            system: entry.system.clone(),
            problem: self.display_text(language, &entry.problem, notices).await,
            first_step: self.display_text(language, &entry.first_step, notices).await,
            escalation: self.display_text(language, &entry.escalation, notices).await,
            score: candidate.score,
            quality,
            quality_label: self.strings.resolve(language, quality.label_key()),
            position: index + 1,
            total,
        }
    }

    /// `text` translated through the cache, or as written when translation fails.
    async fn display_text(&self, language: &str, text: &str, notices: &mut Vec<Notice>) -> String {
        match self.translations.translate(text, language).await {
            Ok(translated) => translated,
            Err(err) => {
                warn!("Showing untranslated text: {}", err);
                if !notices.iter().any(|n| n.kind == NoticeKind::TranslationUnavailable) {
                    notices.push(self.notice(
                        language,
                        NoticeKind::TranslationUnavailable,
                        Some(err.to_string()),
                    ));
                }
                text.to_string()
            }
        }
    }

    async fn explain(
        &self,
        language: &str,
        candidate: &Candidate,
        user_description: &str,
        notices: &mut Vec<Notice>,
    ) -> Option<String> {
        let prompt = prompts::explain(&candidate.entry, user_description, language);
        match self.language.complete(&prompt.system, &prompt.turns).await {
            Ok(explanation) => Some(explanation),
            Err(err) => {
                warn!("Explanation unavailable for {:?}: {}", candidate.entry.problem, err);
                notices.push(self.notice(
                    language,
                    NoticeKind::ExplanationUnavailable,
                    Some(err.to_string()),
                ));
                None
            }
        }
    }

    fn notice(&self, language: &str, kind: NoticeKind, detail: Option<String>) -> Notice {
        Notice {
            kind,
            message: self.strings.resolve(language, kind.message_key()),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        path::PathBuf,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    use async_trait::async_trait;

    use super::*;
    use crate::{
        knowledge::Entry,
        language::{ChatMessage, LanguageServiceError},
        matcher::{MatchSettings, SystemFilter},
        storage::{DataLoadError, DataSaveError},
        transcription::TranscriptionError,
        translation::{TranslationMap, TranslationStore},
    };

    /// Answers each prompt family with a recognizable string.
    #[derive(Default)]
    struct ScriptedLanguage {
        calls: Mutex<Vec<String>>,
        translations: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl LanguageService for ScriptedLanguage {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn complete(
            &self,
            system: &str,
            turns: &[ChatMessage],
        ) -> std::result::Result<String, LanguageServiceError> {
            self.calls.lock().unwrap().push(system.to_string());
            if self.fail {
                return Err(LanguageServiceError::RequestFailed("offline".into()));
            }

            let content = &turns[0].content;
            if system.starts_with("You translate short troubleshooting requests") {
                Ok("printer offline".to_string())
            } else if let Some(rest) = system.strip_prefix("Translate the user's text into ") {
                self.translations.fetch_add(1, Ordering::SeqCst);
                let language = rest.split('.').next().unwrap_or_default();
                Ok(format!("[{}] {}", language, content))
            } else {
                let problem = content
                    .lines()
                    .find_map(|line| line.strip_prefix("Problem: "))
                    .unwrap_or_default();
                Ok(format!("Steps for {}", problem))
            }
        }
    }

    struct FixedTranscriber(std::result::Result<&'static str, ()>);

    #[async_trait]
    impl TranscriptionService for FixedTranscriber {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn transcribe(&self, _clip: AudioClip) -> std::result::Result<String, TranscriptionError> {
            self.0
                .map(str::to_string)
                .map_err(|_| TranscriptionError::RequestFailed("upstream down".into()))
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        saves: AtomicUsize,
    }

    #[async_trait]
    impl TranslationStore for MemoryStore {
        async fn load(&self) -> std::result::Result<TranslationMap, DataLoadError> {
            Err(DataLoadError::Missing {
                path: PathBuf::from("memory"),
            })
        }

        async fn save(&self, _translations: &TranslationMap) -> std::result::Result<(), DataSaveError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Harness {
        orchestrator: DialogueOrchestrator,
        language: Arc<ScriptedLanguage>,
        store: Arc<MemoryStore>,
    }

    fn harness_with(entries: Vec<Entry>, language: ScriptedLanguage, transcript: std::result::Result<&'static str, ()>) -> Harness {
        let language = Arc::new(language);
        let store = Arc::new(MemoryStore::default());
        let translations = Arc::new(TranslationCache::new(language.clone(), store.clone()));
        let orchestrator = DialogueOrchestrator::new(
            Arc::new(KnowledgeBase::new(entries)),
            Matcher::new(MatchSettings::default()),
            translations,
            Arc::new(UiStrings::builtin()),
            language.clone(),
            Arc::new(FixedTranscriber(transcript)),
        );
        Harness {
            orchestrator,
            language,
            store,
        }
    }

    fn pos_entries() -> Vec<Entry> {
        vec![
            Entry::new(Some("POS"), "printer battery low", "charge the battery", "call x200"),
            Entry::new(Some("POS"), "printer password locked", "reseat the receipt paper", "call x300"),
            Entry::new(Some("KDS"), "screen blank", "check the power", "call x400"),
        ]
    }

    fn harness() -> Harness {
        harness_with(pos_entries(), ScriptedLanguage::default(), Ok("printer offline"))
    }

    fn pos_session(language: &str) -> SessionContext {
        let mut session = SessionContext::new(language);
        session.set_system(SystemFilter::parse("POS"));
        session
    }

    #[tokio::test]
    async fn exact_match_is_best_match() {
        let h = harness_with(
            vec![Entry::new(Some("POS"), "printer offline", "check cable", "call x123")],
            ScriptedLanguage::default(),
            Ok(""),
        );
        let mut session = pos_session("English");

        let turn = h.orchestrator.submit_query(&mut session, "printer offline").await.unwrap();
        assert_eq!(turn.kind, TurnKind::Suggestion);
        let candidate = turn.candidate.unwrap();
        assert_eq!(candidate.score, 100);
        assert_eq!(candidate.quality_label, "Best Match");
        assert_eq!(candidate.problem, "printer offline");
        assert_eq!((candidate.position, candidate.total), (1, 1));
        assert_eq!(turn.explanation.as_deref(), Some("Steps for printer offline"));
        assert!(turn.notices.is_empty());
    }

    #[tokio::test]
    async fn no_results_keeps_awaiting_query() {
        let h = harness();
        let mut session = pos_session("English");

        let turn = h.orchestrator.submit_query(&mut session, "screen frozen").await.unwrap();
        assert_eq!(turn.kind, TurnKind::NoResults);
        assert_eq!(turn.outcome, Outcome::AwaitingQuery);
        assert_eq!(turn.message, "No results found");
        assert!(turn.candidate.is_none());
        assert!(h.language.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejecting_walks_to_exhaustion() {
        let h = harness();
        let mut session = pos_session("English");

        let first = h.orchestrator.submit_query(&mut session, "printer offline").await.unwrap();
        assert_eq!(first.candidate.unwrap().problem, "printer battery low");

        let second = h.orchestrator.reject_current(&mut session).await.unwrap();
        assert_eq!(second.kind, TurnKind::Suggestion);
        let view = second.candidate.unwrap();
        assert_eq!(view.problem, "printer password locked");
        assert_eq!(view.position, 2);
        assert_eq!(second.explanation.as_deref(), Some("Steps for printer password locked"));

        let last = h.orchestrator.reject_current(&mut session).await.unwrap();
        assert_eq!(last.kind, TurnKind::Exhausted);
        assert_eq!(last.outcome, Outcome::Exhausted);
        assert!(last.message.contains("contact support"));

        let err = h.orchestrator.reject_current(&mut session).await.unwrap_err();
        assert!(matches!(
            err,
            HelpdeskError::InvalidAction { action: "reject_current", state: Outcome::Exhausted }
        ));
    }

    #[tokio::test]
    async fn confirm_before_query_is_invalid() {
        let h = harness();
        let mut session = SessionContext::default();
        let err = h.orchestrator.confirm_resolved(&mut session).await.unwrap_err();
        assert!(matches!(err, HelpdeskError::InvalidAction { state: Outcome::AwaitingQuery, .. }));
    }

    #[tokio::test]
    async fn overlong_query_is_refused_before_matching() {
        let h = harness();
        let mut session = pos_session("French");
        h.orchestrator.submit_query(&mut session, "printer offline").await.unwrap();
        let calls_before = h.language.calls.lock().unwrap().len();

        let query = "printer ".repeat(2_000);
        let err = h.orchestrator.submit_query(&mut session, &query).await.unwrap_err();
        assert!(matches!(err, HelpdeskError::QueryTooLong { length: 15_999, max: 500 }));
        assert_eq!(session.conversation().outcome(), Outcome::AwaitingFeedback);
        assert_eq!(session.last_query(), Some("printer offline"));
        assert_eq!(h.language.calls.lock().unwrap().len(), calls_before);

        let at_limit = "x".repeat(500);
        assert!(h.orchestrator.submit_query(&mut session, &at_limit).await.is_ok());
    }

    #[tokio::test]
    async fn resolving_then_new_query_starts_over() {
        let h = harness();
        let mut session = pos_session("English");
        h.orchestrator.submit_query(&mut session, "printer offline").await.unwrap();

        let resolved = h.orchestrator.confirm_resolved(&mut session).await.unwrap();
        assert_eq!(resolved.kind, TurnKind::Resolved);
        assert_eq!(resolved.outcome, Outcome::Resolved);

        let again = h.orchestrator.submit_query(&mut session, "printer offline").await.unwrap();
        assert_eq!(again.kind, TurnKind::Suggestion);
        assert_eq!(session.conversation().cursor(), 0);
    }

    #[tokio::test]
    async fn non_english_session_normalizes_and_translates() {
        let h = harness();
        let mut session = pos_session("French");

        let turn = h.orchestrator.submit_query(&mut session, "imprimante hors ligne").await.unwrap();
        assert_eq!(turn.kind, TurnKind::Suggestion);
        let view = turn.candidate.unwrap();
        assert_eq!(view.problem, "[French] printer battery low");
        assert_eq!(view.escalation, "[French] call x200");
        assert_eq!(session.last_query(), Some("imprimante hors ligne"));
        assert_eq!(h.language.translations.load(Ordering::SeqCst), 3);
        assert_eq!(h.store.saves.load(Ordering::SeqCst), 1);

        // Same strings again come from the cache.
        h.orchestrator.reset(&mut session);
        h.orchestrator.submit_query(&mut session, "imprimante hors ligne").await.unwrap();
        assert_eq!(h.language.translations.load(Ordering::SeqCst), 3);
        assert_eq!(h.store.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn service_outage_falls_back_to_source_text() {
        let h = harness_with(
            pos_entries(),
            ScriptedLanguage {
                fail: true,
                ..Default::default()
            },
            Ok(""),
        );
        let mut session = pos_session("French");

        let turn = h.orchestrator.submit_query(&mut session, "printer offline").await.unwrap();
        assert_eq!(turn.kind, TurnKind::Suggestion);
        assert_eq!(turn.candidate.unwrap().problem, "printer battery low");
        assert!(turn.explanation.is_none());

        let kinds: Vec<NoticeKind> = turn.notices.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NoticeKind::QueryNotTranslated,
                NoticeKind::TranslationUnavailable,
                NoticeKind::ExplanationUnavailable,
            ]
        );
    }

    #[tokio::test]
    async fn transcription_success_and_failure() {
        let session = SessionContext::default();

        let ok = harness();
        let transcript = ok.orchestrator.transcribe(&session, AudioClip::wav(vec![1])).await;
        assert_eq!(transcript.text.as_deref(), Some("printer offline"));

        let failing = harness_with(pos_entries(), ScriptedLanguage::default(), Err(()));
        let transcript = failing.orchestrator.transcribe(&session, AudioClip::wav(vec![1])).await;
        assert!(transcript.text.is_none());
        assert_eq!(transcript.notices[0].kind, NoticeKind::TranscriptionFailed);
        assert_eq!(transcript.notices[0].message, "Transcription failed");
    }

    #[tokio::test]
    async fn empty_capture_is_reported_not_sent() {
        let h = harness();
        let transcript = h
            .orchestrator
            .transcribe_capture(&SessionContext::default(), AudioCapture::default())
            .await;
        assert!(transcript.text.is_none());
        assert_eq!(transcript.notices[0].kind, NoticeKind::TranscriptionFailed);
    }

    #[tokio::test]
    async fn load_warnings_are_localized_notices() {
        let h = harness();
        let warnings = h.orchestrator.load_warnings("English");
        assert_eq!(warnings.len(), 0);

        let language = Arc::new(ScriptedLanguage::default());
        let store = Arc::new(MemoryStore::default());
        let translations = Arc::new(TranslationCache::load(language.clone(), store).await);
        let orchestrator = DialogueOrchestrator::new(
            Arc::new(KnowledgeBase::default()),
            Matcher::default(),
            translations,
            Arc::new(UiStrings::builtin()),
            language,
            Arc::new(FixedTranscriber(Ok(""))),
        );
        let warnings = orchestrator.load_warnings("English");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, NoticeKind::DataLoad);
        assert_eq!(warnings[0].message, "Some data could not be loaded");
    }
}
