//! JSON export.

use crate::dataset::Record;
use crate::error::Result;

/// Pretty-printed (2-space indent) JSON array of record objects.
pub fn to_json(records: &[&Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Clipboard text for the records of the current page.
pub fn clipboard_payload(page: &[&Record]) -> Result<String> {
    to_json(page)
}
