use std::collections::HashMap;

use serde_json::Value;

/// The flag write was rejected by the underlying document storage.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Narrow persistence port for the per-item configuration flag.
///
/// The host backs this with its document storage; a flag payload is one JSON
/// value per item id. Writes are applied in the order issued and are not
/// retried on failure.
pub trait FlagStore {
    fn get_flag(&self, item_id: &str) -> Option<Value>;
    fn set_flag(&mut self, item_id: &str, value: Value) -> Result<(), StoreError>;
}

/// In-memory store for tests and the CLI harness.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    flags: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with the flag payloads carried on item documents.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a crate::item::Item>) -> Self {
        let mut store = Self::new();
        for item in items {
            if let Some(config) = item.raw_config() {
                store.flags.insert(item.id.clone(), config.clone());
            }
        }
        store
    }
}

impl FlagStore for MemoryStore {
    fn get_flag(&self, item_id: &str) -> Option<Value> {
        self.flags.get(item_id).cloned()
    }

    fn set_flag(&mut self, item_id: &str, value: Value) -> Result<(), StoreError> {
        self.flags.insert(item_id.to_string(), value);
        Ok(())
    }
}
