//! Delimited-text export.

use crate::dataset::{Field, Record};
use crate::error::{Result, TabviewError};

/// Render records as CSV.
///
/// The header is the full schema in its original order, independent of the
/// display order or which columns are visible. Rows are separated by CRLF
/// with no trailing terminator; fields are quoted only when needed.
pub fn to_delimited_text(fields: &[Field], records: &[&Record]) -> Result<String> {
    to_delimited_text_with(fields, records, b',')
}

/// Like [`to_delimited_text`] with an explicit delimiter.
pub fn to_delimited_text_with(
    fields: &[Field],
    records: &[&Record],
    delimiter: u8,
) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(fields)?;
    for record in records {
        writer.write_record(fields.iter().map(|f| record.get_str(f)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TabviewError::Export(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| TabviewError::Export(e.to_string()))?;

    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<Field> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_and_rows() {
        let schema = fields(&["id", "name"]);
        let a = Record::from_cells(&schema, &["1", "Alice"]);
        let b = Record::from_cells(&schema, &["2", ""]);

        let text = to_delimited_text(&schema, &[&a, &b]).unwrap();
        assert_eq!(text, "id,name\r\n1,Alice\r\n2,");
    }

    #[test]
    fn test_quotes_when_needed() {
        let schema = fields(&["text"]);
        let r = Record::from_cells(&schema, &["a,b \"c\"\nd"]);

        let text = to_delimited_text(&schema, &[&r]).unwrap();
        assert_eq!(text, "text\r\n\"a,b \"\"c\"\"\nd\"");
    }

    #[test]
    fn test_header_uses_schema_order() {
        let schema = fields(&["a", "b"]);
        // Keys in a different order than the schema.
        let r = Record::new().with("b", "2").with("a", "1");

        let text = to_delimited_text(&schema, &[&r]).unwrap();
        assert_eq!(text, "a,b\r\n1,2");
    }

    #[test]
    fn test_empty_records_emit_header_only() {
        let text = to_delimited_text(&fields(&["x", "y"]), &[]).unwrap();
        assert_eq!(text, "x,y");
    }

    #[test]
    fn test_tab_delimiter() {
        let schema = fields(&["a", "b"]);
        let r = Record::from_cells(&schema, &["1", "2"]);
        let text = to_delimited_text_with(&schema, &[&r], b'\t').unwrap();
        assert_eq!(text, "a\tb\r\n1\t2");
    }
}
