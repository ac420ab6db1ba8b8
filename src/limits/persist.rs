//! Configuration Store
//!
//! Flat key→integer persistence behind the limit store. Keys have the form
//! `enchantment-limits.<id>`; every save is a set followed by a flush.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::error::PersistenceError;

/// Section under which limits are stored
pub const LIMITS_SECTION: &str = "enchantment-limits";

/// Full configuration key for an enchantment key
pub fn limit_key(enchantment: &str) -> String {
    format!("{}.{}", LIMITS_SECTION, enchantment)
}

/// External key→integer store
pub trait ConfigStore: fmt::Debug + Send {
    /// Read every stored key
    fn load(&mut self) -> Result<BTreeMap<String, i64>, PersistenceError>;

    /// Set (or with `None`, clear) one key and flush it
    fn save(&mut self, key: &str, value: Option<i64>) -> Result<(), PersistenceError>;
}

/// TOML file store: `a.b = n` is written as `n` under table `[a]`
///
/// A `save` before any `load` reads the file first, so existing keys survive.
#[derive(Debug)]
pub struct TomlFileStore {
    path: PathBuf,
    document: Option<toml::Table>,
}

impl TomlFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            document: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.display_path(),
            source,
        }
    }

    /// Write via a sibling temp file and rename, so the old file survives a failed write
    fn write_atomically(&self, content: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.io_error(e)
        })
    }
}

impl ConfigStore for TomlFileStore {
    fn load(&mut self) -> Result<BTreeMap<String, i64>, PersistenceError> {
        if !self.path.exists() {
            debug!(path = %self.display_path(), "limits file not found, starting empty");
            self.document = Some(toml::Table::new());
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let document: toml::Table =
            toml::from_str(&content).map_err(|e| PersistenceError::Malformed {
                path: self.display_path(),
                reason: e.to_string(),
            })?;

        let mut flat = BTreeMap::new();
        for (key, value) in &document {
            match value {
                toml::Value::Integer(n) => {
                    flat.insert(key.clone(), *n);
                }
                toml::Value::Table(table) => {
                    for (sub, value) in table {
                        match value.as_integer() {
                            Some(n) => {
                                flat.insert(format!("{}.{}", key, sub), n);
                            }
                            None => warn!(key = %key, entry = %sub, "ignoring non-integer value"),
                        }
                    }
                }
                _ => warn!(key = %key, "ignoring non-integer value"),
            }
        }

        self.document = Some(document);
        Ok(flat)
    }

    fn save(&mut self, key: &str, value: Option<i64>) -> Result<(), PersistenceError> {
        if self.document.is_none() {
            self.load()?;
        }
        let mut document = self.document.clone().unwrap_or_default();

        match key.split_once('.') {
            Some((section, sub)) => {
                let entry = document
                    .entry(section.to_string())
                    .or_insert(toml::Value::Table(toml::Table::new()));
                let table = entry.as_table_mut().ok_or_else(|| PersistenceError::Malformed {
                    path: self.display_path(),
                    reason: format!("`{}` is not a table", section),
                })?;
                match value {
                    Some(n) => {
                        table.insert(sub.to_string(), toml::Value::Integer(n));
                    }
                    None => {
                        table.remove(sub);
                    }
                }
            }
            None => match value {
                Some(n) => {
                    document.insert(key.to_string(), toml::Value::Integer(n));
                }
                None => {
                    document.remove(key);
                }
            },
        }

        let content = toml::to_string(&document)
            .map_err(|e| PersistenceError::Rejected(e.to_string()))?;
        self.write_atomically(&content)?;

        // Only adopt the new document once it is on disk
        self.document = Some(document);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    values: BTreeMap<String, i64>,
    reject_writes: bool,
}

/// In-memory store; clones share the same contents
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with flat entries
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        let store = Self::new();
        {
            let mut state = store.state.write().unwrap_or_else(|e| e.into_inner());
            state.values = values.into_iter().map(|(k, v)| (k.into(), v)).collect();
        }
        store
    }

    /// Make every subsequent `save` fail (or succeed again)
    pub fn set_reject_writes(&self, reject: bool) {
        self.state
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .reject_writes = reject;
    }

    /// Current persisted value of a key
    pub fn value(&self, key: &str) -> Option<i64> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values
            .get(key)
            .copied()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&mut self) -> Result<BTreeMap<String, i64>, PersistenceError> {
        Ok(self
            .state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values
            .clone())
    }

    fn save(&mut self, key: &str, value: Option<i64>) -> Result<(), PersistenceError> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        if state.reject_writes {
            return Err(PersistenceError::Rejected(format!("store is read-only ({})", key)));
        }
        match value {
            Some(n) => state.values.insert(key.to_string(), n),
            None => state.values.remove(key),
        };
        Ok(())
    }
}
