//! Column state management: which fields are shown and in which order.

mod manager;
mod state;

pub use manager::{ColumnManager, load_column_settings};
pub use state::{ColumnState, DEFAULT_VISIBLE_COLUMNS};
