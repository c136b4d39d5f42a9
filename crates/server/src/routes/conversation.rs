//! Conversation turns: describe a problem, then answer yes/no per suggestion.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::post,
};
use helpdesk::TurnResponse;
use serde::Deserialize;
use utils::response::ApiResponse;
use uuid::Uuid;

use super::ApiJson;
use crate::{AppState, error::ApiError};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions/{id}/query", post(submit_query))
        .route("/sessions/{id}/yes", post(confirm_resolved))
        .route("/sessions/{id}/no", post(reject_current))
        .route("/sessions/{id}/reset", post(reset))
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// POST /api/sessions/{id}/query - Rank a problem description and present the best match
async fn submit_query(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<QueryRequest>,
) -> Result<ResponseJson<ApiResponse<TurnResponse>>, ApiError> {
    let session = state.session(id)?;
    let mut session = session.lock().await;

    let turn = state
        .orchestrator()
        .submit_query(&mut session, &request.query)
        .await?;
    Ok(ResponseJson(ApiResponse::success(turn)))
}

/// POST /api/sessions/{id}/yes - The current suggestion fixed it
async fn confirm_resolved(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<TurnResponse>>, ApiError> {
    let session = state.session(id)?;
    let mut session = session.lock().await;

    let turn = state.orchestrator().confirm_resolved(&mut session).await?;
    Ok(ResponseJson(ApiResponse::success(turn)))
}

/// POST /api/sessions/{id}/no - Move on to the next suggestion
async fn reject_current(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<TurnResponse>>, ApiError> {
    let session = state.session(id)?;
    let mut session = session.lock().await;

    let turn = state.orchestrator().reject_current(&mut session).await?;
    Ok(ResponseJson(ApiResponse::success(turn)))
}

/// POST /api/sessions/{id}/reset - Start over with a new description
async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<TurnResponse>>, ApiError> {
    let session = state.session(id)?;
    let mut session = session.lock().await;

    Ok(ResponseJson(ApiResponse::success(
        state.orchestrator().reset(&mut session),
    )))
}
