//! Column preference persistence.
//!
//! Preferences live in a [`PreferenceStore`], a plain string key/value backend
//! that may fail. The engine never talks to a store directly: it goes through
//! a [`PreferenceGateway`], which logs and swallows every backend failure so a
//! broken store degrades to "nothing saved" instead of an error.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use tabview::persistence::{MemoryStore, PreferenceGateway};
//!
//! let gateway = PreferenceGateway::new(Arc::new(MemoryStore::new()));
//! gateway.set("columns_people.csv", r#"["id","name"]"#);
//! assert_eq!(
//!     gateway.get("columns_people.csv").as_deref(),
//!     Some(r#"["id","name"]"#)
//! );
//! ```

mod file;
mod gateway;
mod memory;

pub use file::{FileStore, preferences_path};
pub use gateway::{PreferenceGateway, PreferenceStore, order_key, visibility_key};
pub use memory::MemoryStore;
