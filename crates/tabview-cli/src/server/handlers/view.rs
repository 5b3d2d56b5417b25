//! View handlers: the current page plus search, sort, paging and mode.

use std::num::NonZeroUsize;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use tabview::{FilterScope, FilterState, Session, SortState, ViewMode};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response describing everything needed to render the current page.
#[derive(Serialize)]
pub struct ViewResponse {
    pub identity: String,
    pub mode: ViewMode,
    pub summary: SummaryInfo,
    /// Visible fields, in display order.
    pub columns: Vec<String>,
    pub rows: Vec<RowInfo>,
    pub page: PageInfo,
    pub search: FilterState,
    pub sort: SortState,
    /// Pretty JSON of the page, present in JSON mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
}

#[derive(Serialize)]
pub struct SummaryInfo {
    pub total_rows: usize,
    pub matched_rows: usize,
    pub is_filtered: bool,
    pub truncated: bool,
}

#[derive(Serialize)]
pub struct RowInfo {
    /// Position within the matching rows (1-based).
    pub number: usize,
    /// Position in the dataset (0-based).
    pub index: usize,
    pub cells: Vec<String>,
}

#[derive(Serialize)]
pub struct PageInfo {
    pub index: usize,
    pub total: usize,
    pub size: usize,
    pub show_all: bool,
    /// First and last row number on the page.
    pub range: Option<(usize, usize)>,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Build the view response for the session's current state.
pub fn view_response(session: &Session) -> Result<ViewResponse, ApiError> {
    let view = session.view()?;
    let identity = session
        .dataset()
        .map(|d| d.identity().to_string())
        .unwrap_or_default();

    let rows = view
        .page
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| RowInfo {
            number: view.page.row_number(i),
            index: row.index,
            cells: view
                .columns
                .iter()
                .map(|f| row.record.get_str(f).to_string())
                .collect(),
        })
        .collect();

    let json = match session.mode() {
        ViewMode::Json if !view.page.rows.is_empty() => Some(session.clipboard_payload()?),
        ViewMode::Json => Some("[]".to_string()),
        ViewMode::Table => None,
    };

    Ok(ViewResponse {
        identity,
        mode: session.mode(),
        summary: SummaryInfo {
            total_rows: view.total_rows,
            matched_rows: view.matched_count(),
            is_filtered: view.is_filtered,
            truncated: session.source().map(|s| s.truncated).unwrap_or(false),
        },
        columns: view.columns.iter().map(|f| f.to_string()).collect(),
        rows,
        page: PageInfo {
            index: view.page.page_index,
            total: view.page.display_total(),
            size: session.page_state().page_size.get(),
            show_all: session.page_state().show_all,
            range: view.page.display_range(),
            has_previous: view.page.has_previous(),
            has_next: view.page.has_next(),
        },
        search: session.filter().clone(),
        sort: session.sort().clone(),
        json,
    })
}

/// Get the current page.
pub async fn get_view(State(state): State<AppState>) -> Result<Json<ViewResponse>, ApiError> {
    let session = state.session.read().await;
    Ok(Json(view_response(&session)?))
}

/// Request body for changing the search.
#[derive(Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub term: String,
    /// Leave out to keep the current scope.
    pub scope: Option<FilterScope>,
}

/// Change the search term and scope.
pub async fn set_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ViewResponse>, ApiError> {
    let mut session = state.session.write().await;
    if let Some(scope) = request.scope {
        session.set_search_scope(scope)?;
    }
    session.set_search(request.term);
    Ok(Json(view_response(&session)?))
}

/// Request body for sorting; no field clears the sort.
#[derive(Deserialize)]
pub struct SortRequest {
    pub field: Option<String>,
}

/// Sort by a field (again to flip direction).
pub async fn request_sort(
    State(state): State<AppState>,
    Json(request): Json<SortRequest>,
) -> Result<Json<ViewResponse>, ApiError> {
    let mut session = state.session.write().await;
    match request.field {
        Some(field) => {
            session.request_sort(&field)?;
        }
        None => session.clear_sort(),
    }
    Ok(Json(view_response(&session)?))
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStep {
    First,
    Previous,
    Next,
    Last,
}

/// Either `{"page": n}` or `{"to": "next"}`.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum PageRequest {
    Index { page: usize },
    Step { to: PageStep },
}

/// Move to another page.
pub async fn go_to_page(
    State(state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> Result<Json<ViewResponse>, ApiError> {
    let mut session = state.session.write().await;
    match request {
        PageRequest::Index { page } => session.go_to_page(page)?,
        PageRequest::Step { to } => match to {
            PageStep::First => session.first_page()?,
            PageStep::Previous => session.previous_page()?,
            PageStep::Next => session.next_page()?,
            PageStep::Last => session.last_page()?,
        },
    };
    Ok(Json(view_response(&session)?))
}

/// Request body for page sizing.
#[derive(Deserialize)]
pub struct PageSizeRequest {
    pub page_size: Option<NonZeroUsize>,
    pub show_all: Option<bool>,
}

/// Change the page size or switch show-all.
pub async fn set_page_size(
    State(state): State<AppState>,
    Json(request): Json<PageSizeRequest>,
) -> Result<Json<ViewResponse>, ApiError> {
    if request.page_size.is_none() && request.show_all.is_none() {
        return Err(ApiError::BadRequest(
            "Expected page_size or show_all".to_string(),
        ));
    }

    let mut session = state.session.write().await;
    if let Some(size) = request.page_size {
        session.set_page_size(size);
    }
    if let Some(show_all) = request.show_all {
        session.set_show_all(show_all);
    }
    Ok(Json(view_response(&session)?))
}

#[derive(Deserialize)]
pub struct ModeRequest {
    pub mode: ViewMode,
}

/// Switch between table and JSON presentation.
pub async fn set_mode(
    State(state): State<AppState>,
    Json(request): Json<ModeRequest>,
) -> Result<Json<ViewResponse>, ApiError> {
    let mut session = state.session.write().await;
    session.set_mode(request.mode);
    Ok(Json(view_response(&session)?))
}
