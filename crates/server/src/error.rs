use axum::{
    Json,
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use helpdesk::HelpdeskError;
use thiserror::Error;
use utils::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Helpdesk(#[from] HelpdeskError),
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Invalid JSON body: {0}")]
    Json(#[from] JsonRejection),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Not Found: {0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_type) = match &self {
            ApiError::Helpdesk(err) => match err {
                HelpdeskError::InvalidAction { .. } => (StatusCode::CONFLICT, "InvalidAction"),
                HelpdeskError::QueryTooLong { .. } => (StatusCode::BAD_REQUEST, "QueryTooLong"),
                HelpdeskError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ConfigError"),
            },
            ApiError::Multipart(_) => (StatusCode::BAD_REQUEST, "MultipartError"),
            ApiError::Json(_) => (StatusCode::BAD_REQUEST, "JsonError"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BadRequest"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound"),
        };

        let error_message = match &self {
            ApiError::Helpdesk(
                HelpdeskError::InvalidAction { .. } | HelpdeskError::QueryTooLong { .. },
            ) => self.to_string(),
            ApiError::Multipart(_) => {
                "Failed to read the uploaded audio. Please record again and retry.".to_string()
            }
            ApiError::Json(rejection) => rejection.body_text(),
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::NotFound(msg) => msg.clone(),
            _ => format!("{}: {}", error_type, self),
        };
        if status_code.is_server_error() {
            tracing::error!("{}: {}", error_type, self);
        }

        let response = ApiResponse::<()>::error(&error_message);
        (status_code, Json(response)).into_response()
    }
}
