use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use helpdesk::CacheStats;
use utils::response::ApiResponse;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/translations/stats", get(get_stats))
}

/// GET /api/translations/stats - Translation cache hit/miss counters
async fn get_stats(State(state): State<AppState>) -> ResponseJson<ApiResponse<CacheStats>> {
    ResponseJson(ApiResponse::success(state.orchestrator().translations().stats()))
}
