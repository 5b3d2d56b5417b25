//! Soft-failing access to a preference store.

use std::sync::Arc;

use tracing::warn;

use crate::error::Result;

/// A string key/value backend for preferences.
pub trait PreferenceStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Key holding the JSON array of visible fields for a dataset.
pub fn visibility_key(identity: &str) -> String {
    format!("columns_{identity}")
}

/// Key holding the JSON array with the display order for a dataset.
pub fn order_key(identity: &str) -> String {
    format!("columnOrder_{identity}")
}

/// Wraps a [`PreferenceStore`] so that reads and writes never fail.
#[derive(Clone)]
pub struct PreferenceGateway {
    store: Arc<dyn PreferenceStore>,
}

impl PreferenceGateway {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Read a value. Backend failures are logged and read as `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read preference '{key}': {e}");
                None
            }
        }
    }

    /// Write a value. Backend failures are logged and otherwise ignored.
    pub fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!("Failed to write preference '{key}': {e}");
        }
    }
}

impl std::fmt::Debug for PreferenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceGateway").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TabviewError;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(TabviewError::Persistence("store offline".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(TabviewError::Persistence("store offline".to_string()))
        }
    }

    #[test]
    fn test_keys_are_namespaced_by_identity() {
        assert_eq!(visibility_key("data.csv"), "columns_data.csv");
        assert_eq!(order_key("data.csv"), "columnOrder_data.csv");
    }

    #[test]
    fn test_failures_are_swallowed() {
        let gateway = PreferenceGateway::new(Arc::new(BrokenStore));
        gateway.set("k", "v");
        assert_eq!(gateway.get("k"), None);
    }
}
