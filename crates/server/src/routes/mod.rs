use axum::{Router, extract::FromRequest, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{AppState, error::ApiError};

pub mod catalog;
pub mod conversation;
pub mod health;
pub mod sessions;
pub mod translations;
pub mod voice;

/// `Json` extractor whose rejections use the API error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

pub fn router(state: AppState) -> Router {
    let base_routes = Router::new()
        .route("/health", get(health::health_check))
        .merge(catalog::router())
        .merge(sessions::router())
        .merge(conversation::router())
        .merge(voice::router())
        .merge(translations::router())
        .with_state(state);

    Router::new()
        .nest("/api", base_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
