//! Column visibility and order handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use tabview::{ColumnState, TabviewError};

use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Serialize)]
pub struct ColumnsResponse {
    /// Every field in display order.
    pub columns: Vec<ColumnInfo>,
    pub visible_count: usize,
}

#[derive(Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub position: usize,
    pub visible: bool,
}

impl From<&ColumnState> for ColumnsResponse {
    fn from(state: &ColumnState) -> Self {
        Self {
            columns: state
                .order()
                .iter()
                .enumerate()
                .map(|(position, name)| ColumnInfo {
                    name: name.clone(),
                    position,
                    visible: state.is_visible(name),
                })
                .collect(),
            visible_count: state.visible_count(),
        }
    }
}

/// List every column with its visibility.
pub async fn get_columns(
    State(state): State<AppState>,
) -> Result<Json<ColumnsResponse>, ApiError> {
    let session = state.session.read().await;
    let columns = session.columns().ok_or(TabviewError::NoDataset)?;
    Ok(Json(columns.into()))
}

#[derive(Deserialize)]
pub struct ToggleRequest {
    pub field: String,
}

/// Show or hide one column.
pub async fn toggle_column(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<ColumnsResponse>, ApiError> {
    let mut session = state.session.write().await;
    Ok(Json(session.toggle_column(&request.field)?.into()))
}

#[derive(Deserialize)]
pub struct ShowAllRequest {
    pub show: bool,
}

/// Show or hide every column.
pub async fn set_all_columns(
    State(state): State<AppState>,
    Json(request): Json<ShowAllRequest>,
) -> Result<Json<ColumnsResponse>, ApiError> {
    let mut session = state.session.write().await;
    Ok(Json(session.set_all_columns(request.show)?.into()))
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    pub from: usize,
    pub to: usize,
}

/// Move a column to a new position.
pub async fn reorder_columns(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<ColumnsResponse>, ApiError> {
    let mut session = state.session.write().await;
    Ok(Json(session.reorder_columns(request.from, request.to)?.into()))
}
