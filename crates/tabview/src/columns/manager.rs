//! Column state bound to a dataset and persisted on every change.

use tracing::{debug, warn};

use crate::dataset::Field;
use crate::error::Result;
use crate::persistence::{PreferenceGateway, order_key, visibility_key};

use super::state::ColumnState;

/// Read a saved field list. Missing or unreadable values read as `None`.
fn load_field_list(gateway: &PreferenceGateway, key: &str) -> Option<Vec<Field>> {
    let raw = gateway.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(list) => Some(list),
        Err(e) => {
            warn!("Ignoring corrupt preference '{key}': {e}");
            None
        }
    }
}

/// Load the column state saved for `identity`, falling back to defaults.
///
/// Never fails: unreadable stores and corrupt values behave as if nothing
/// was saved.
pub fn load_column_settings(
    gateway: &PreferenceGateway,
    identity: &str,
    fields: &[Field],
    default_visible: usize,
) -> ColumnState {
    let visible = load_field_list(gateway, &visibility_key(identity));
    let order = load_field_list(gateway, &order_key(identity));
    debug!(
        "Column settings for '{identity}': saved visibility {}, saved order {}",
        visible.is_some(),
        order.is_some()
    );
    ColumnState::from_saved(fields, visible, order, default_visible)
}

/// Owns the [`ColumnState`] of one dataset and persists it after each change.
#[derive(Debug, Clone)]
pub struct ColumnManager {
    identity: String,
    fields: Vec<Field>,
    state: ColumnState,
    gateway: PreferenceGateway,
}

impl ColumnManager {
    /// Restore saved settings for `identity` (or defaults).
    pub fn load(
        gateway: PreferenceGateway,
        identity: impl Into<String>,
        fields: &[Field],
        default_visible: usize,
    ) -> Self {
        let identity = identity.into();
        let state = load_column_settings(&gateway, &identity, fields, default_visible);
        Self {
            identity,
            fields: fields.to_vec(),
            state,
            gateway,
        }
    }

    pub fn state(&self) -> &ColumnState {
        &self.state
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Fields to render, in display order.
    pub fn display_fields(&self) -> Vec<&Field> {
        self.state.display_fields()
    }

    /// Show or hide one field.
    pub fn toggle_visibility(&mut self, field: &str) -> Result<&ColumnState> {
        self.state.toggle(field)?;
        self.persist();
        Ok(&self.state)
    }

    /// Show every field, or hide them all.
    pub fn set_all_visible(&mut self, show: bool) -> &ColumnState {
        self.state.set_all(show);
        self.persist();
        &self.state
    }

    /// Move the field at `from` to position `to` in the display order.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<&ColumnState> {
        self.state.move_field(from, to)?;
        self.persist();
        Ok(&self.state)
    }

    fn persist(&self) {
        let visible = self.state.visible_in(&self.fields);
        let order = self.state.order();

        match (serde_json::to_string(&visible), serde_json::to_string(order)) {
            (Ok(visible), Ok(order)) => {
                self.gateway.set(&visibility_key(&self.identity), &visible);
                self.gateway.set(&order_key(&self.identity), &order);
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to encode column settings for '{}': {e}", self.identity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::{Result, TabviewError};
    use crate::persistence::{MemoryStore, PreferenceStore};

    fn fields(names: &[&str]) -> Vec<Field> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn memory_gateway() -> (Arc<MemoryStore>, PreferenceGateway) {
        let store = Arc::new(MemoryStore::new());
        let gateway = PreferenceGateway::new(store.clone());
        (store, gateway)
    }

    struct FailingReads;

    impl PreferenceStore for FailingReads {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(TabviewError::Persistence("disk on fire".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_mutations_are_persisted() {
        let (store, gateway) = memory_gateway();
        let schema = fields(&["a", "b", "c"]);
        let mut manager = ColumnManager::load(gateway, "t.csv", &schema, 10);

        manager.toggle_visibility("b").unwrap();
        manager.reorder(2, 0).unwrap();

        assert_eq!(
            store.get("columns_t.csv").unwrap().as_deref(),
            Some(r#"["a","c"]"#)
        );
        assert_eq!(
            store.get("columnOrder_t.csv").unwrap().as_deref(),
            Some(r#"["c","a","b"]"#)
        );
    }

    #[test]
    fn test_saved_settings_are_restored() {
        let (_store, gateway) = memory_gateway();
        let schema = fields(&["a", "b", "c"]);

        let mut first = ColumnManager::load(gateway.clone(), "t.csv", &schema, 10);
        first.set_all_visible(false);
        first.toggle_visibility("c").unwrap();
        first.reorder(0, 2).unwrap();

        let second = ColumnManager::load(gateway, "t.csv", &schema, 10);
        assert_eq!(second.state(), first.state());
    }

    #[test]
    fn test_settings_are_keyed_by_identity() {
        let (_store, gateway) = memory_gateway();
        let schema = fields(&["a", "b"]);

        let mut one = ColumnManager::load(gateway.clone(), "one.csv", &schema, 10);
        one.set_all_visible(false);

        let two = ColumnManager::load(gateway, "two.csv", &schema, 10);
        assert_eq!(two.state().visible_count(), 2);
    }

    #[test]
    fn test_failing_store_falls_back_to_defaults() {
        let gateway = PreferenceGateway::new(Arc::new(FailingReads));
        let schema = fields(&["a", "b"]);

        let state = load_column_settings(&gateway, "t.csv", &schema, 1);
        assert_eq!(state, ColumnState::with_defaults(&schema, 1));
    }

    #[test]
    fn test_corrupt_json_falls_back_to_defaults() {
        let (store, gateway) = memory_gateway();
        store.set("columns_t.csv", "not json").unwrap();
        store.set("columnOrder_t.csv", "{\"also\": \"wrong\"}").unwrap();
        let schema = fields(&["a", "b"]);

        let state = load_column_settings(&gateway, "t.csv", &schema, 10);
        assert_eq!(state, ColumnState::with_defaults(&schema, 10));
    }

    #[test]
    fn test_invalid_reorder_does_not_persist() {
        let (store, gateway) = memory_gateway();
        let schema = fields(&["a", "b"]);
        let mut manager = ColumnManager::load(gateway, "t.csv", &schema, 10);

        assert!(manager.reorder(0, 5).is_err());
        assert!(store.is_empty());
    }
}
