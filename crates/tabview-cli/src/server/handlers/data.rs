//! Dataset loading handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use super::view::{ViewResponse, view_response};
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Dataset contents picked by the user, uploaded inline.
#[derive(Deserialize)]
pub struct LoadRequest {
    pub name: String,
    pub text: String,
}

/// Load a new dataset. On failure the previous dataset stays in place.
pub async fn load_dataset(
    State(state): State<AppState>,
    Json(request): Json<LoadRequest>,
) -> Result<Json<ViewResponse>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Dataset name is empty".to_string()));
    }
    let mut session = state.session.write().await;
    session.load_text(request.name, &request.text)?;
    Ok(Json(view_response(&session)?))
}

/// Load the built-in sample dataset.
pub async fn load_sample(State(state): State<AppState>) -> Result<Json<ViewResponse>, ApiError> {
    let mut session = state.session.write().await;
    session.load_sample()?;
    Ok(Json(view_response(&session)?))
}
