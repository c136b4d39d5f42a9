//! Per-session context passed into every orchestrator call.

use serde::{Deserialize, Serialize};

use crate::{
    conversation::{ConversationState, Outcome},
    language::CANONICAL_LANGUAGE,
    matcher::SystemFilter,
};

#[derive(Debug, Clone)]
pub struct SessionContext {
    language: String,
    conversation: ConversationState,
    last_query: Option<String>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(CANONICAL_LANGUAGE)
    }
}

impl SessionContext {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            conversation: ConversationState::new(),
            last_query: None,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut ConversationState {
        &mut self.conversation
    }

    pub fn system_filter(&self) -> &SystemFilter {
        self.conversation.system_filter()
    }

    /// The description the current candidates were ranked for, as the user wrote it.
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub(crate) fn set_last_query(&mut self, query: Option<String>) {
        self.last_query = query;
    }

    /// Switches the display language. Returns `true` (after resetting) when it changed.
    pub fn set_language(&mut self, language: &str) -> bool {
        let language = language.trim();
        if language.is_empty() || language == self.language {
            return false;
        }
        self.language = language.to_string();
        self.reset();
        true
    }

    /// Switches the system filter. Returns `true` (after resetting) when it changed.
    pub fn set_system(&mut self, system_filter: SystemFilter) -> bool {
        let changed = self.conversation.select_system(system_filter);
        if changed {
            self.last_query = None;
        }
        changed
    }

    pub fn reset(&mut self) {
        self.conversation.reset();
        self.last_query = None;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            language: self.language.clone(),
            system: self.system_filter().label().map(str::to_string),
            outcome: self.conversation.outcome(),
            cursor: self.conversation.cursor(),
            candidate_count: self.conversation.candidates().len(),
            last_query: self.last_query.clone(),
        }
    }
}

/// Serializable view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub language: String,
    pub system: Option<String>,
    pub outcome: Outcome,
    pub cursor: usize,
    pub candidate_count: usize,
    pub last_query: Option<String>,
}
