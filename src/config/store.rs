//! Configuration store
//!
//! Key-value access to the persisted application configuration. The store is
//! owned by the host application; this crate only reads from it.

use anyhow::Context;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

use crate::utils::error::AppResult;

/// Read-only view of the configuration store
pub trait ConfigStore: Send + Sync {
    /// Get a value by key, `None` when unset
    fn get(&self, key: &str) -> AppResult<Option<Value>>;
}

/// Store backed by a JSON object file
///
/// The file is re-read on every lookup so edits made by the settings window
/// apply to the next call without a restart. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store reading from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default store location: `<config dir>/aisummary/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aisummary").join("config.json"))
    }

    fn load(&self) -> anyhow::Result<Map<String, Value>> {
        if !self.path.exists() {
            debug!("Config store {:?} does not exist, treating as empty", self.path);
            return Ok(Map::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config store: {:?}", self.path))?;

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config store JSON: {:?}", self.path))?;

        match value {
            Value::Object(map) => Ok(map),
            other => anyhow::bail!("Config store must be a JSON object, found: {}", other),
        }
    }
}

impl ConfigStore for JsonFileStore {
    fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let mut map = self.load()?;
        Ok(map.remove(key).filter(|v| !v.is_null()))
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.into(), value.into());
    }

    /// Remove a value
    pub fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryStore
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let store = MemoryStore::new();
        for (key, value) in iter {
            store.set(key, value);
        }
        store
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let values = self
            .values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(values.get(key).filter(|v| !v.is_null()).cloned())
    }
}
