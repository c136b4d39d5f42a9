use axum::{extract::State, response::Json as ResponseJson};
use serde::Serialize;
use utils::response::ApiResponse;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub knowledge_base_entries: usize,
    pub active_sessions: usize,
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> ResponseJson<ApiResponse<HealthStatus>> {
    ResponseJson(ApiResponse::success(HealthStatus {
        status: "ok",
        knowledge_base_entries: state.orchestrator().knowledge_base().len(),
        active_sessions: state.session_count(),
    }))
}
