//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tabview::TabviewError;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Error from the tabview library.
    Tabview(TabviewError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Tabview(e) => match e {
                TabviewError::NoDataset => (StatusCode::CONFLICT, "no_dataset"),
                TabviewError::UnknownField(_) => (StatusCode::NOT_FOUND, "unknown_field"),
                TabviewError::IndexOutOfRange { .. } => {
                    (StatusCode::BAD_REQUEST, "index_out_of_range")
                }
                TabviewError::EmptyData(_) => (StatusCode::UNPROCESSABLE_ENTITY, "empty_data"),
                TabviewError::Parse { .. }
                | TabviewError::Csv(_)
                | TabviewError::Processing(_)
                | TabviewError::DuplicateField(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "invalid_dataset")
                }
                TabviewError::Io { .. } => (StatusCode::NOT_FOUND, "io"),
                TabviewError::Persistence(_)
                | TabviewError::Export(_)
                | TabviewError::Json(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status();
        let message = match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Tabview(e) => e.to_string(),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<TabviewError> for ApiError {
    fn from(err: TabviewError) -> Self {
        ApiError::Tabview(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Tabview(e) => write!(f, "Tabview error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
