//! Export and clipboard handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use tabview::{ExportFormat, ExportScope};

use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Deserialize, Default)]
pub struct ExportQuery {
    #[serde(default)]
    pub scope: ExportScope,
}

async fn export(state: AppState, format: ExportFormat, scope: ExportScope) -> Result<Response, ApiError> {
    let session = state.session.read().await;
    let export = session.export(format, scope)?;

    let headers = [
        (header::CONTENT_TYPE, format.mime_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.file_name),
        ),
    ];
    Ok((headers, export.contents).into_response())
}

/// Download the matching rows (or the page) as JSON.
pub async fn export_json(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    export(state, ExportFormat::Json, query.scope).await
}

/// Download the matching rows (or the page) as CSV.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    export(state, ExportFormat::Csv, query.scope).await
}

#[derive(Serialize)]
pub struct ClipboardResponse {
    pub text: String,
}

/// Pretty JSON of the current page, for copying.
pub async fn get_clipboard(
    State(state): State<AppState>,
) -> Result<Json<ClipboardResponse>, ApiError> {
    let session = state.session.read().await;
    Ok(Json(ClipboardResponse {
        text: session.clipboard_payload()?,
    }))
}
