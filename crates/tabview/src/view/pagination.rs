//! Page slicing.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::dataset::Row;

/// Rows per page used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Requested page size and (1-based) page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub page_size: NonZeroUsize,
    pub page_index: usize,
    /// Put every row on a single page.
    #[serde(default)]
    pub show_all: bool,
}

impl PageState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            page_index: 1,
            show_all: false,
        }
    }

    /// Page size actually used for a sequence of `len` rows.
    pub fn effective_size(&self, len: usize) -> NonZeroUsize {
        if self.show_all {
            NonZeroUsize::new(len).unwrap_or(NonZeroUsize::MIN)
        } else {
            self.page_size
        }
    }

    /// Page index actually requested (show-all always asks for page 1).
    pub fn effective_index(&self) -> usize {
        if self.show_all { 1 } else { self.page_index }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One page of a row sequence.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub rows: Vec<Row<'a>>,
    /// `ceil(len / page_size)`; zero for an empty sequence.
    pub total_pages: usize,
    /// Requested index clamped into `[1, max(total_pages, 1)]`.
    pub page_index: usize,
    /// Zero-based offset of the first row of this page in the full sequence.
    pub offset: usize,
    /// Length of the full sequence.
    pub total_rows: usize,
}

impl Page<'_> {
    /// Total pages as shown to the user: an empty sequence is "1 of 1".
    pub fn display_total(&self) -> usize {
        self.total_pages.max(1)
    }

    /// 1-based inclusive range of rows on this page, `None` when empty.
    pub fn display_range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            None
        } else {
            Some((self.offset + 1, self.offset + self.rows.len()))
        }
    }

    /// Row number shown next to the `i`-th row of this page.
    pub fn row_number(&self, i: usize) -> usize {
        self.offset + i + 1
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages
    }
}

/// Number of pages needed for `len` rows.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Clamp a 1-based page index into the valid range for `total_pages`.
pub fn clamp_index(page_index: usize, total_pages: usize) -> usize {
    page_index.clamp(1, total_pages.max(1))
}

/// Slice out the requested page.
pub fn paginate<'a>(rows: &[Row<'a>], page_size: NonZeroUsize, page_index: usize) -> Page<'a> {
    let total_pages = total_pages(rows.len(), page_size);
    let page_index = clamp_index(page_index, total_pages);
    let offset = ((page_index - 1) * page_size.get()).min(rows.len());
    let end = (offset + page_size.get()).min(rows.len());

    Page {
        rows: rows[offset..end].to_vec(),
        total_pages,
        page_index,
        offset,
        total_rows: rows.len(),
    }
}

/// Slice out the page described by `state`, honouring show-all mode.
pub fn apply<'a>(rows: &[Row<'a>], state: &PageState) -> Page<'a> {
    paginate(rows, state.effective_size(rows.len()), state.effective_index())
}
