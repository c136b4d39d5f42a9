//! Everything a client needs to draw the first screen in one language.

use std::collections::BTreeMap;

use axum::{
    Router,
    extract::{Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use helpdesk::{Notice, language::CANONICAL_LANGUAGE};
use serde::{Deserialize, Serialize};
use utils::response::ApiResponse;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/catalog", get(get_catalog))
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub language: String,
    pub languages: Vec<String>,
    /// Known systems plus any others named in the knowledge base; the "not sure" option is the `not_sure` string
    pub systems: Vec<String>,
    pub strings: BTreeMap<String, String>,
    pub warnings: Vec<Notice>,
}

/// GET /api/catalog?language= - Languages, systems and UI strings
async fn get_catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> ResponseJson<ApiResponse<Catalog>> {
    let orchestrator = state.orchestrator();
    let language = params
        .language
        .filter(|language| orchestrator.strings().supports(language))
        .unwrap_or_else(|| CANONICAL_LANGUAGE.to_string());

    ResponseJson(ApiResponse::success(Catalog {
        languages: orchestrator.strings().languages(),
        systems: orchestrator.knowledge_base().systems(),
        strings: orchestrator.ui_strings(&language),
        warnings: orchestrator.load_warnings(&language),
        language,
    }))
}
