//! Data source metadata.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::parser::ParseOutput;

/// Metadata about the loaded source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Dataset identity (file name without path).
    pub identity: String,
    /// SHA-256 hash of the raw contents.
    pub hash: String,
    /// Raw size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    pub encoding: String,
    /// Number of ingested data rows (excluding header).
    pub row_count: usize,
    pub column_count: usize,
    /// Whether rows past the row cap were dropped.
    pub truncated: bool,
    /// Number of non-fatal row issues reported by the parser.
    pub issue_count: usize,
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Describe raw `contents` that parsed into `output`.
    pub fn new(identity: impl Into<String>, contents: &[u8], output: &ParseOutput) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        Self {
            identity: identity.into(),
            hash,
            size_bytes: contents.len() as u64,
            format: format_name(output.delimiter).to_string(),
            encoding: "utf-8".to_string(),
            row_count: output.records.len(),
            column_count: output.fields.len(),
            truncated: output.truncated,
            issue_count: output.issues.len(),
            loaded_at: Utc::now(),
        }
    }
}

/// Format name for a delimiter.
pub fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Dataset identity for a file: its name without the directory.
pub fn identity_from_path(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    #[test]
    fn test_metadata_describes_output() {
        let raw = "a\tb\n1\t2\n";
        let output = Parser::new().parse_str(raw).unwrap();
        let meta = SourceMetadata::new("x.tsv", raw.as_bytes(), &output);

        assert_eq!(meta.format, "tsv");
        assert_eq!(meta.row_count, 1);
        assert_eq!(meta.column_count, 2);
        assert_eq!(meta.size_bytes, raw.len() as u64);
        assert!(meta.hash.starts_with("sha256:"));
        assert!(!meta.truncated);
    }

    #[test]
    fn test_identity_from_path() {
        assert_eq!(identity_from_path("data/people.csv"), "people.csv");
        assert_eq!(identity_from_path("people.csv"), "people.csv");
    }
}
