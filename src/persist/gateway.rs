use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::persist::{
    error::PersistenceError,
    store::{DurableStore, MemoryStore},
};

/// Key under which the form snapshot is stored unless configured otherwise.
pub const DEFAULT_SNAPSHOT_KEY: &str = "formData";

/// Typed save/load over a `DurableStore`.
pub struct PersistenceGateway {
    store: Box<dyn DurableStore>,
}

impl PersistenceGateway {
    pub fn new(store: impl DurableStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Serialize and store `value`. A value that cannot become JSON is an
    /// error, never a silent no-op.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), PersistenceError> {
        let json = serde_json::to_value(value).map_err(|e| PersistenceError::Serialize {
            key: key.to_string(),
            source: e,
        })?;
        self.store.put(key, json)
    }

    pub fn load(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        self.store.get(key)
    }

    /// Load and deserialize. Missing key → `Ok(None)`.
    pub fn load_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistenceError> {
        match self.store.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| PersistenceError::Deserialize {
                    key: key.to_string(),
                    source: e,
                }),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for PersistenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceGateway").finish_non_exhaustive()
    }
}
