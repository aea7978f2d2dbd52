use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::persist::error::PersistenceError;

/// The external key-value store. Any backing technology works as long as
/// `put` has completed when it returns.
pub trait DurableStore {
    fn put(&mut self, key: &str, value: Value) -> Result<(), PersistenceError>;

    /// A missing key is `Ok(None)`, never an error.
    fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError>;
}

impl<S: DurableStore + ?Sized> DurableStore for Box<S> {
    fn put(&mut self, key: &str, value: Value) -> Result<(), PersistenceError> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        (**self).get(key)
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Process-memory store; contents die with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DurableStore for MemoryStore {
    fn put(&mut self, key: &str, value: Value) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// All keys live in one JSON object file. Writes go to a sibling temp file
/// which is then renamed over the original.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn read_all(&self) -> Result<serde_json::Map<String, Value>, PersistenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(serde_json::Map::new()),
            Err(e) => {
                return Err(PersistenceError::Io {
                    path: self.display_path(),
                    source: e,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(serde_json::Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(PersistenceError::Corrupt {
                path: self.display_path(),
                message: format!("found {}", json_kind(&other)),
            }),
            Err(e) => Err(PersistenceError::Corrupt {
                path: self.display_path(),
                message: e.to_string(),
            }),
        }
    }
}

impl DurableStore for JsonFileStore {
    fn put(&mut self, key: &str, value: Value) -> Result<(), PersistenceError> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), value);

        let body = serde_json::to_string_pretty(&Value::Object(map)).map_err(|e| PersistenceError::Serialize {
            key: key.to_string(),
            source: e,
        })?;

        let tmp = self.path.with_extension("tmp");
        let io_err = |e| PersistenceError::Io {
            path: self.display_path(),
            source: e,
        };
        std::fs::write(&tmp, body).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }

    fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        Ok(self.read_all()?.remove(key))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
