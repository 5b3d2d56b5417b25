//! Dataset store: the immutable ingested schema and records.

mod record;
mod store;
mod value;

pub use record::{Field, Record};
pub use store::{Dataset, Row};
pub use value::Value;
