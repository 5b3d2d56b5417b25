//! Search filtering.

use serde::{Deserialize, Serialize};

use crate::dataset::{Field, Row};

/// Which fields a search term is tested against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "field", rename_all = "snake_case")]
pub enum FilterScope {
    /// Every field of the record, hidden columns included.
    #[default]
    All,
    /// A single named field.
    Field(Field),
}

/// Current search term and scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub term: String,
    pub scope: FilterScope,
}

impl FilterState {
    pub fn new(term: impl Into<String>, scope: FilterScope) -> Self {
        Self {
            term: term.into(),
            scope,
        }
    }

    /// Whether the term is blank, making the filter a no-op.
    pub fn is_blank(&self) -> bool {
        self.term.trim().is_empty()
    }
}

/// Keep the rows matching `filter`, preserving their relative order.
///
/// Matching is case-insensitive substring containment. A blank term returns
/// the input unchanged.
pub fn apply<'a>(rows: &[Row<'a>], filter: &FilterState) -> Vec<Row<'a>> {
    if filter.is_blank() {
        return rows.to_vec();
    }

    let needle = filter.term.to_lowercase();
    let contains = |text: &str| text.to_lowercase().contains(&needle);

    rows.iter()
        .filter(|row| match &filter.scope {
            FilterScope::All => row.record.values().any(|v| contains(v.as_str())),
            FilterScope::Field(field) => contains(row.record.get_str(field)),
        })
        .copied()
        .collect()
}
