//! Shared application state: the orchestrator plus the per-browser session registry.

use std::sync::Arc;

use dashmap::DashMap;
use helpdesk::{DialogueOrchestrator, SessionContext, SystemFilter, language::CANONICAL_LANGUAGE};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::ApiError;

pub type SharedSession = Arc<Mutex<SessionContext>>;

#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<DialogueOrchestrator>,
    sessions: Arc<DashMap<Uuid, SharedSession>>,
}

impl AppState {
    pub fn new(orchestrator: Arc<DialogueOrchestrator>) -> Self {
        Self {
            orchestrator,
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub fn orchestrator(&self) -> &DialogueOrchestrator {
        &self.orchestrator
    }

    /// Registers a new session and returns its id.
    pub fn create_session(&self, language: Option<&str>, system: SystemFilter) -> (Uuid, SharedSession) {
        let mut context = SessionContext::new(language.unwrap_or(CANONICAL_LANGUAGE));
        context.set_system(system);

        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(context));
        self.sessions.insert(id, session.clone());
        tracing::debug!("Created session {} ({} active)", id, self.sessions.len());
        (id, session)
    }

    pub fn session(&self, id: Uuid) -> Result<SharedSession, ApiError> {
        self.sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ApiError::NotFound(format!("Session {} not found", id)))
    }

    pub fn remove_session(&self, id: Uuid) -> Result<(), ApiError> {
        self.sessions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(format!("Session {} not found", id)))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
