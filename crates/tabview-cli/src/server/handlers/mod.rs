//! API request handlers.

mod columns;
mod data;
mod export;
mod view;

pub use columns::*;
pub use data::*;
pub use export::*;
pub use view::*;
