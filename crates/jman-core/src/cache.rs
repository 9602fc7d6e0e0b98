// ── Persistent cache ──
//
// Durable key-value string storage holding the last successfully fetched
// JSON serialization of each collection. Read at initialization, written
// after a complete remote fetch. No TTL, no versioning.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use strum::{Display, EnumIter};
use thiserror::Error;
use tracing::trace;

// ── Keys ────────────────────────────────────────────────────────────

/// One of the three top-level collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    Servers,
    Sites,
    Plugins,
}

impl Collection {
    /// Fixed cache key for this collection.
    pub const fn cache_key(self) -> &'static str {
        match self {
            Self::Servers => "jman_servers",
            Self::Sites => "jman_sites",
            Self::Plugins => "jman_plugins",
        }
    }
}

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("cached {collection} are not valid JSON: {source}")]
    Parse {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {collection} for the cache: {source}")]
    Serialize {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid cache key '{0}'")]
    InvalidKey(String),
}

// ── Trait ───────────────────────────────────────────────────────────

/// Key-value string store that survives process restarts.
///
/// Implementations must be cheap to call from async code: values are a
/// few hundred kilobytes of JSON at most.
pub trait PersistentCache: Send + Sync {
    /// Read a value. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Delete a value. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

// ── File-backed cache ───────────────────────────────────────────────

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so
/// a crash mid-write never leaves a truncated entry behind.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CacheError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_err(key: &str) -> impl FnOnce(io::Error) -> CacheError + '_ {
    move |source| CacheError::Io {
        key: key.to_owned(),
        source,
    }
}

impl PersistentCache for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.entry_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => {
                trace!(key, bytes = value.len(), "cache read");
                Ok(Some(value))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(key)(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let path = self.entry_path(key)?;
        std::fs::create_dir_all(&self.dir).map_err(io_err(key))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(io_err(key))?;
        std::fs::rename(&tmp, &path).map_err(io_err(key))?;
        trace!(key, bytes = value.len(), "cache write");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let path = self.entry_path(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(key)(e)),
        }
    }
}

// ── In-memory cache ─────────────────────────────────────────────────

/// Process-local cache. Used for `--no-cache` runs and tests.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersistentCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries().remove(key);
        Ok(())
    }
}
