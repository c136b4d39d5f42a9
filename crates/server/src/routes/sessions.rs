use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use helpdesk::{SessionSnapshot, SystemFilter};
use serde::{Deserialize, Serialize};
use utils::response::ApiResponse;
use uuid::Uuid;

use super::ApiJson;
use crate::{AppState, error::ApiError};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/language", put(set_language))
        .route("/sessions/{id}/system", put(set_system))
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub system: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct SetSystemRequest {
    /// `null`, blank or "I'm not sure" searches every system
    #[serde(default)]
    pub system: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    #[serde(flatten)]
    pub state: SessionSnapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    #[serde(flatten)]
    pub session: SessionView,
    /// Whether the value changed; a change resets the conversation
    pub reset: bool,
}

fn parse_system(system: Option<&str>) -> SystemFilter {
    system.map(SystemFilter::parse).unwrap_or_default()
}

fn check_language(state: &AppState, language: &str) -> Result<(), ApiError> {
    if state.orchestrator().strings().supports(language.trim()) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Unsupported language: {}", language)))
    }
}

/// POST /api/sessions - Start a session
async fn create_session(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateSessionRequest>,
) -> Result<ResponseJson<ApiResponse<SessionView>>, ApiError> {
    if let Some(language) = &request.language {
        check_language(&state, language)?;
    }

    let (id, session) = state.create_session(
        request.language.as_deref().map(str::trim),
        parse_system(request.system.as_deref()),
    );
    let snapshot = session.lock().await.snapshot();
    tracing::info!("Session {} started in {}", id, snapshot.language);

    Ok(ResponseJson(ApiResponse::success(SessionView {
        id,
        state: snapshot,
    })))
}

/// GET /api/sessions/{id}
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<SessionView>>, ApiError> {
    let session = state.session(id)?;
    let snapshot = session.lock().await.snapshot();
    Ok(ResponseJson(ApiResponse::success(SessionView {
        id,
        state: snapshot,
    })))
}

/// PUT /api/sessions/{id}/language - Switch display language; resets the conversation on change
async fn set_language(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<SetLanguageRequest>,
) -> Result<ResponseJson<ApiResponse<SessionUpdate>>, ApiError> {
    check_language(&state, &request.language)?;
    let session = state.session(id)?;
    let mut session = session.lock().await;

    let reset = session.set_language(&request.language);
    Ok(ResponseJson(ApiResponse::success(SessionUpdate {
        session: SessionView {
            id,
            state: session.snapshot(),
        },
        reset,
    })))
}

/// PUT /api/sessions/{id}/system - Switch system filter; resets the conversation on change
async fn set_system(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<SetSystemRequest>,
) -> Result<ResponseJson<ApiResponse<SessionUpdate>>, ApiError> {
    let session = state.session(id)?;
    let mut session = session.lock().await;

    let reset = session.set_system(parse_system(request.system.as_deref()));
    Ok(ResponseJson(ApiResponse::success(SessionUpdate {
        session: SessionView {
            id,
            state: session.snapshot(),
        },
        reset,
    })))
}

/// DELETE /api/sessions/{id}
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.remove_session(id)?;
    tracing::info!("Session {} closed", id);
    Ok(ResponseJson(ApiResponse::success(())))
}
