//! CSV/TSV parser with delimiter detection.

use tracing::{debug, warn};

use crate::dataset::{Field, Record};
use crate::error::{Result, TabviewError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Hard cap on ingested data rows.
pub const DEFAULT_MAX_ROWS: usize = 5000;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the first row holds field names.
    pub has_header: bool,
    /// Drop lines with no content at all.
    pub skip_empty_lines: bool,
    /// Maximum data rows to read (None = all). Rows past the cap are never read.
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            skip_empty_lines: true,
            max_rows: Some(DEFAULT_MAX_ROWS),
            quote: b'"',
        }
    }
}

/// What kind of non-fatal problem a row had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseIssueKind {
    /// Fewer cells than fields; missing cells read as empty.
    TooFewFields,
    /// More cells than fields; extra cells are dropped.
    TooManyFields,
}

/// A non-fatal, per-row parse diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// 1-based data row (header excluded).
    pub row: usize,
    pub kind: ParseIssueKind,
    pub message: String,
}

/// Parser output handed to the dataset store.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub fields: Vec<Field>,
    pub records: Vec<Record>,
    pub issues: Vec<ParseIssue>,
    /// Delimiter that was used.
    pub delimiter: u8,
    /// Whether rows past `max_rows` were left unread.
    pub truncated: bool,
}

/// Turns raw text into a schema and records.
///
/// Fatal problems (malformed input, undecodable bytes, no header) are errors;
/// row-shape problems are reported in [`ParseOutput::issues`].
pub trait ParserAdapter: Send + Sync {
    fn parse(&self, text: &str) -> Result<ParseOutput>;
}

/// Parses delimited text with the `csv` crate.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Decode UTF-8 bytes and parse them.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParseOutput> {
        let text = std::str::from_utf8(bytes).map_err(|e| TabviewError::Parse {
            row: 0,
            message: format!("input is not valid UTF-8: {e}"),
        })?;
        self.parse_str(text)
    }

    /// Parse already-decoded text.
    pub fn parse_str(&self, text: &str) -> Result<ParseOutput> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(text),
        };
        check_quotes(text, delimiter, self.config.quote)?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = reader.records();

        let (fields, pending): (Vec<Field>, _) = if self.config.has_header {
            match rows.next() {
                Some(Ok(header)) => (header.iter().map(|s| s.to_string()).collect(), None),
                Some(Err(e)) => return Err(parse_error(0, e)),
                None => (Vec::new(), None),
            }
        } else {
            // Generate column names from the first record
            match rows.next() {
                Some(Ok(first)) => (
                    (0..first.len()).map(|i| format!("column_{}", i + 1)).collect(),
                    Some(first),
                ),
                Some(Err(e)) => return Err(parse_error(1, e)),
                None => (Vec::new(), None),
            }
        };

        if fields.is_empty() {
            return Err(TabviewError::Processing(
                "parser output has no fields (missing header row)".to_string(),
            ));
        }

        let mut records = Vec::new();
        let mut issues = Vec::new();
        let mut truncated = false;

        for (offset, result) in pending.into_iter().map(Ok).chain(rows).enumerate() {
            let row = offset + 1;
            let record = result.map_err(|e| parse_error(row, e))?;

            let blank = record.len() <= 1 && record.iter().all(|c| c.is_empty());
            if self.config.skip_empty_lines && blank {
                continue;
            }

            if let Some(max) = self.config.max_rows {
                if records.len() >= max {
                    truncated = true;
                    break;
                }
            }

            if record.len() != fields.len() {
                let kind = if record.len() < fields.len() {
                    ParseIssueKind::TooFewFields
                } else {
                    ParseIssueKind::TooManyFields
                };
                let message = format!(
                    "expected {} fields, found {}",
                    fields.len(),
                    record.len()
                );
                warn!("Row {row}: {message}");
                issues.push(ParseIssue { row, kind, message });
            }

            let cells: Vec<&str> = record.iter().collect();
            records.push(Record::from_cells(&fields, &cells));
        }

        debug!(
            "Parsed {} fields, {} records, {} issues (delimiter {:?}, truncated: {})",
            fields.len(),
            records.len(),
            issues.len(),
            delimiter as char,
            truncated
        );

        Ok(ParseOutput {
            fields,
            records,
            issues,
            delimiter,
            truncated,
        })
    }
}

impl ParserAdapter for Parser {
    fn parse(&self, text: &str) -> Result<ParseOutput> {
        self.parse_str(text)
    }
}

fn parse_error(row: usize, e: csv::Error) -> TabviewError {
    TabviewError::Parse {
        row,
        message: e.to_string(),
    }
}

/// Reject input whose last quoted field is never closed.
///
/// A quote only opens a field at the start of that field; quotes elsewhere
/// are literal, matching how the reader treats them.
fn check_quotes(text: &str, delimiter: u8, quote: u8) -> Result<()> {
    let mut bytes = text.bytes().peekable();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut row = 0;
    let mut opened_at = 0;

    while let Some(b) = bytes.next() {
        if in_quotes {
            if b == quote {
                if bytes.peek() == Some(&quote) {
                    bytes.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }

        match b {
            _ if b == quote && at_field_start => {
                in_quotes = true;
                opened_at = row;
                at_field_start = false;
            }
            _ if b == delimiter => at_field_start = true,
            b'\n' => {
                at_field_start = true;
                row += 1;
            }
            b'\r' => {}
            _ => at_field_start = false,
        }
    }

    if in_quotes {
        return Err(TabviewError::Parse {
            row: opened_at,
            message: "quoted field is never closed".to_string(),
        });
    }
    Ok(())
}

/// Detect the delimiter by analyzing the first few lines.
///
/// Falls back to a comma when no candidate appears consistently.
pub fn detect_delimiter(text: &str) -> u8 {
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();

    // Count occurrences of each delimiter in each line
    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let Some(&first_count) = counts.first() else {
            continue;
        };
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs get a small bonus since
        // they rarely appear inside values.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    best_delimiter
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
