//! Export serializers and export file naming.

mod delimited;
mod json;

pub use delimited::{to_delimited_text, to_delimited_text_with};
pub use json::{clipboard_payload, to_json};

use serde::{Deserialize, Serialize};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv;charset=utf-8",
        }
    }
}

/// Which records an export covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportScope {
    /// Every record matching the search, in sorted order.
    #[default]
    Matched,
    /// Only the current page.
    Page,
}

/// A finished export: suggested file name and contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Export {
    pub file_name: String,
    pub format: ExportFormat,
    pub contents: String,
}

/// File name for exporting dataset `identity`.
///
/// # Example
///
/// ```
/// use tabview::export::{ExportFormat, export_file_name};
///
/// assert_eq!(export_file_name("sales.csv", ExportFormat::Json), "sales_export.json");
/// assert_eq!(export_file_name("sales.tsv", ExportFormat::Csv), "sales.tsv_export.csv");
/// ```
pub fn export_file_name(identity: &str, format: ExportFormat) -> String {
    let stem = identity.strip_suffix(".csv").unwrap_or(identity);
    format!("{stem}_export.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name_strips_trailing_csv_only() {
        assert_eq!(export_file_name("a.csv", ExportFormat::Csv), "a_export.csv");
        assert_eq!(
            export_file_name("a.csv.bak", ExportFormat::Json),
            "a.csv.bak_export.json"
        );
        assert_eq!(export_file_name("data", ExportFormat::Json), "data_export.json");
    }
}
