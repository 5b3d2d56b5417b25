//! Column sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::dataset::{Field, Row, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Active sort key and direction. `key: None` keeps the filter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<Field>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(key: impl Into<Field>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }
}

/// Next sort state after the user asks to sort by `key`.
///
/// Asking again for the current ascending key flips it to descending; any
/// other request starts over ascending.
pub fn request_sort(current: &SortState, key: &str) -> SortState {
    match (&current.key, current.direction) {
        (Some(k), SortDirection::Ascending) if k == key => {
            SortState::by(key, SortDirection::Descending)
        }
        _ => SortState::by(key, SortDirection::Ascending),
    }
}

/// Compare two cell values: numerically when both are numbers, otherwise by
/// code point.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.as_str().cmp(b.as_str()),
    }
}

/// Order rows by the sort key. Rows with equal keys keep their input order
/// in both directions.
pub fn apply<'a>(rows: &[Row<'a>], sort: &SortState) -> Vec<Row<'a>> {
    let Some(key) = sort.key.as_deref() else {
        return rows.to_vec();
    };

    let descending = sort.direction == SortDirection::Descending;
    let mut sorted = rows.to_vec();
    merge_sort(&mut sorted, &|a: &Row<'a>, b: &Row<'a>| {
        let ord = compare_values(a.record.get(key), b.record.get(key));
        if descending { ord.reverse() } else { ord }
    });
    sorted
}

/// Stable merge sort.
///
/// Mixed numeric/text columns make `compare_values` non-transitive
/// ("9" < "10" < "5a" < "9"), which `slice::sort_by` is allowed to panic on.
fn merge_sort<T: Copy, F>(items: &mut [T], cmp: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return;
    }
    let mid = items.len() / 2;
    merge_sort(&mut items[..mid], cmp);
    merge_sort(&mut items[mid..], cmp);

    let mut merged = Vec::with_capacity(items.len());
    let (left, right) = items.split_at(mid);
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        // Take from the left on ties to stay stable.
        if cmp(&right[j], &left[i]) == Ordering::Less {
            merged.push(right[j]);
            j += 1;
        } else {
            merged.push(left[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    items.copy_from_slice(&merged);
}
