//! Input parsing and data source handling.

mod parser;
mod sample;
mod source;

pub use parser::{
    DEFAULT_MAX_ROWS, ParseIssue, ParseIssueKind, ParseOutput, Parser, ParserAdapter,
    ParserConfig, detect_delimiter,
};
pub use sample::{SAMPLE_CSV, SAMPLE_IDENTITY};
pub use source::{SourceMetadata, format_name, identity_from_path};
