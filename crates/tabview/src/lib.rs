//! Tabview: an interactive view engine for tabular data.
//!
//! Tabview loads a delimited text file into an immutable dataset and derives
//! everything a user sees from it: a searched, sorted and paginated view,
//! per-dataset column visibility and order, and JSON or CSV exports.
//!
//! # Core Principles
//!
//! - **Immutable data**: the loaded dataset is never modified by viewing it
//! - **Derived views**: search, sort and paging recompute from scratch
//! - **Soft persistence**: column preferences never make an operation fail
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use tabview::persistence::{MemoryStore, PreferenceGateway};
//! use tabview::Session;
//!
//! let gateway = PreferenceGateway::new(Arc::new(MemoryStore::new()));
//! let mut session = Session::new(gateway);
//! session.load_text("people.csv", "id,name\n1,Alice\n2,Bob").unwrap();
//!
//! session.set_search("bob");
//! let view = session.view().unwrap();
//! assert_eq!(view.matched_count(), 1);
//! ```

pub mod columns;
pub mod dataset;
pub mod error;
pub mod export;
pub mod input;
pub mod persistence;
pub mod view;

mod session;

pub use crate::session::{Session, TabviewConfig, ViewMode};
pub use columns::{ColumnManager, ColumnState};
pub use dataset::{Dataset, Field, Record, Row, Value};
pub use error::{Result, TabviewError};
pub use export::{Export, ExportFormat, ExportScope};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use view::{FilterScope, FilterState, PageState, SortDirection, SortState, View};
