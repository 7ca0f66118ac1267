use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Storage operation error.
///
/// These are **infrastructure errors** (I/O, encoding, lock state) as opposed
/// to domain errors (validation, invariants).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored data could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Synchronous, origin-scoped key-value store.
///
/// Both operations run to completion before returning, so a consumer's
/// read-modify-persist sequence is atomic per call within the single logical
/// thread of control this system assumes.
///
/// Implementations must not interpret values; corrupt or unparsable stored
/// data is a consumer concern (consumers degrade to their empty defaults).
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value durably.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory key-value store.
///
/// Intended for tests/dev; contents do not survive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed key-value store (one JSON object per file).
///
/// Every `set` writes the full map through to disk, so contents survive a
/// process restart. An unreadable or unparsable file at open degrades to an
/// empty map rather than failing construction; the per-key recovery policy
/// stays with the consumers.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "store file unparsable, starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "store file unreadable, starting empty");
                HashMap::new()
            }
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let encoded = serde_json::to_string(entries)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }
}
