//! The derived view: filter, then sort, then paginate.
//!
//! Every stage takes a row sequence and returns a new one; the dataset
//! itself is never touched. [`recompute_view`] runs the whole pipeline and is
//! called after every state change.

pub mod filter;
pub mod pagination;
pub mod sort;

use tracing::debug;

use crate::columns::ColumnState;
use crate::dataset::{Dataset, Field, Record, Row};

pub use filter::{FilterScope, FilterState};
pub use pagination::{DEFAULT_PAGE_SIZE, Page, PageState};
pub use sort::{SortDirection, SortState};

/// The current page of the pipeline plus what is needed to render it.
#[derive(Debug, Clone)]
pub struct View<'a> {
    /// Every row that survived the filter, in sorted order.
    pub matched: Vec<Row<'a>>,
    /// The current page of `matched`.
    pub page: Page<'a>,
    /// Fields to render, in display order.
    pub columns: Vec<&'a Field>,
    /// Rows in the dataset.
    pub total_rows: usize,
    /// Whether a non-blank search term is active.
    pub is_filtered: bool,
}

impl<'a> View<'a> {
    /// Rows matching the search.
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// Records on the current page.
    pub fn page_records(&self) -> Vec<&'a Record> {
        self.page.rows.iter().map(|r| r.record).collect()
    }

    /// Every matching record, in sorted order.
    pub fn matched_records(&self) -> Vec<&'a Record> {
        self.matched.iter().map(|r| r.record).collect()
    }

    /// Display strings of the current page, restricted to `columns`.
    pub fn page_cells(&self) -> Vec<Vec<&'a str>> {
        self.page
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|f| row.record.get_str(f))
                    .collect()
            })
            .collect()
    }
}

/// Run filter, sort and pagination over `dataset`.
pub fn recompute_view<'a>(
    dataset: &'a Dataset,
    filter: &FilterState,
    sort: &SortState,
    page: &PageState,
    columns: &'a ColumnState,
) -> View<'a> {
    let rows = dataset.rows();
    let filtered = filter::apply(&rows, filter);
    let matched = sort::apply(&filtered, sort);
    let page = pagination::apply(&matched, page);

    debug!(
        "Recomputed view of '{}': {} of {} rows match, page {}/{}",
        dataset.identity(),
        matched.len(),
        dataset.row_count(),
        page.page_index,
        page.display_total()
    );

    View {
        matched,
        page,
        columns: columns.display_fields(),
        total_rows: dataset.row_count(),
        is_filtered: !filter.is_blank(),
    }
}
