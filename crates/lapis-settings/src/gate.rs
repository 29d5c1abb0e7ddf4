//! Answers "is this toggle enabled for this destination?".

use crate::catalog::{self, SettingsCategory, CATALOG};
use crate::identifier::SettingsIdentifierPair;
use lapis_core::traits::SettingsStore;
use std::sync::Arc;
use tracing::warn;

/// Resolves a toggle from the catalog default plus any stored override.
#[derive(Clone)]
pub struct SettingsGate {
    store: Arc<dyn SettingsStore>,
    catalog: &'static [SettingsCategory],
}

impl SettingsGate {
    /// Gate over the built-in catalog.
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self::with_catalog(store, CATALOG)
    }

    pub fn with_catalog(store: Arc<dyn SettingsStore>, catalog: &'static [SettingsCategory]) -> Self {
        Self { store, catalog }
    }

    pub fn store(&self) -> &Arc<dyn SettingsStore> {
        &self.store
    }

    pub fn catalog(&self) -> &'static [SettingsCategory] {
        self.catalog
    }

    /// Declared default for `pair`, `true` when the catalog has no entry.
    pub fn default_value(&self, pair: &SettingsIdentifierPair) -> bool {
        catalog::default_for(self.catalog, pair).unwrap_or(true)
    }

    /// Resolve `pair` for `destination_id`. Never fails: a store error
    /// yields the default.
    pub async fn get_value(&self, pair: &SettingsIdentifierPair, destination_id: i64) -> bool {
        let default = self.default_value(pair);
        let key = pair.to_string();
        match self.store.get(&key, destination_id, default).await {
            Ok(value) => value,
            Err(e) => {
                warn!("settings lookup for {key} @ {destination_id} failed, using default: {e}");
                default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CommandSettings, SettingsItem};
    use async_trait::async_trait;
    use lapis_core::error::LapisError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore {
        values: Mutex<HashMap<(String, i64), bool>>,
    }

    #[async_trait]
    impl SettingsStore for MapStore {
        async fn get(&self, key: &str, id: i64, default: bool) -> Result<bool, LapisError> {
            let values = self.values.lock().unwrap();
            Ok(values.get(&(key.to_string(), id)).copied().unwrap_or(default))
        }

        async fn set(&self, key: &str, id: i64, value: bool) -> Result<(), LapisError> {
            self.values
                .lock()
                .unwrap()
                .insert((key.to_string(), id), value);
            Ok(())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl SettingsStore for BrokenStore {
        async fn get(&self, _: &str, _: i64, _: bool) -> Result<bool, LapisError> {
            Err(LapisError::Settings("database is locked".into()))
        }

        async fn set(&self, _: &str, _: i64, _: bool) -> Result<(), LapisError> {
            Err(LapisError::Settings("database is locked".into()))
        }
    }

    static OFF_BY_DEFAULT: &[SettingsCategory] = &[SettingsCategory {
        display_name: "test",
        items: &[CommandSettings {
            identifier: "nsfw",
            display_name: "nsfw",
            items: &[SettingsItem {
                identifier: "1",
                display_name: "nsfw",
                default_value: false,
            }],
        }],
    }];

    #[tokio::test]
    async fn test_unknown_pair_defaults_to_true() {
        let gate = SettingsGate::new(Arc::new(MapStore::default()));
        assert!(gate.get_value(&SettingsIdentifierPair::new("x", "y"), 1).await);
    }

    #[tokio::test]
    async fn test_catalog_default_seeds_lookup() {
        let gate = SettingsGate::with_catalog(Arc::new(MapStore::default()), OFF_BY_DEFAULT);
        let pair = SettingsIdentifierPair::new("nsfw", "1");
        assert!(!gate.get_value(&pair, 1).await);
    }

    #[tokio::test]
    async fn test_stored_value_overrides_default() {
        let store = Arc::new(MapStore::default());
        let gate = SettingsGate::with_catalog(store.clone(), OFF_BY_DEFAULT);
        let pair = SettingsIdentifierPair::new("nsfw", "1");
        store.set("nsfw.1", 7, true).await.unwrap();
        assert!(gate.get_value(&pair, 7).await);
        assert!(!gate.get_value(&pair, 8).await);

        let lite = SettingsIdentifierPair::new("litecommand", "1");
        let builtin = SettingsGate::new(store.clone());
        store.set("litecommand.1", 7, false).await.unwrap();
        assert!(!builtin.get_value(&lite, 7).await);
    }

    #[tokio::test]
    async fn test_store_failure_falls_back_to_default() {
        let gate = SettingsGate::with_catalog(Arc::new(BrokenStore), OFF_BY_DEFAULT);
        assert!(!gate.get_value(&SettingsIdentifierPair::new("nsfw", "1"), 1).await);
        assert!(gate.get_value(&SettingsIdentifierPair::new("other", "1"), 1).await);
    }
}
