//! Key-value storage for wallet persistence.
//!
//! The vault only needs a tiny storage contract: `set` a string under a key,
//! `get` it back, with "never persisted" reported as `None` rather than an
//! error. Two implementations are provided:
//!
//! - [`MemoryStore`]: ephemeral, for tests and throwaway sessions
//! - [`FileStore`]: one file per key under a directory, written atomically
//!   with restrictive permissions
//!
//! Concurrent writers race at the store's discretion; last write wins. Writes
//! are user-initiated and serialized by the calling application, so no
//! locking is performed here.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage mutex poisoned")]
    Poisoned,

    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Minimal key-value storage contract consumed by the vault.
///
/// `get` returns `Ok(None)` when the key has never been written; absence is
/// not an error.
pub trait KeyValueStore: Send + Sync {
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// In-memory store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }
}

/// Durable store that keeps one file per key under a directory.
///
/// Values are written atomically (temp file + rename). On Unix the file is
/// created with mode 0600 so the vault blob is never world-readable, even
/// briefly.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at the given directory, creating it if missing.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open a store at the default location (`~/.ethwallet/store`).
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(default_store_path())
    }

    /// The directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        // Keys are well-known names, not user input; reject anything that
        // would escape the store directory.
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let temp_path = path.with_extension("tmp");
        {
            #[cfg(unix)]
            let mut file = {
                use std::os::unix::fs::OpenOptionsExt;
                fs::OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .mode(0o600)
                    .open(&temp_path)?
            };
            #[cfg(not(unix))]
            let mut file = fs::File::create(&temp_path)?;

            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &path)?;
        tracing::debug!(key, path = %path.display(), "stored value");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

/// Default directory for the file-backed store.
pub fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ethwallet")
        .join("store")
}
