//! Session persistence adapters
//!
//! The store writes through a `SessionStorage` adapter. The file adapter
//! keeps the session as a small JSON document; tests substitute the
//! in-memory adapter.

use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;

use super::store::Session;

/// Persistence boundary for the session store
pub trait SessionStorage: Send + Sync {
    /// Load the persisted session, `None` when absent or unreadable
    fn load(&self) -> Result<Option<Session>, StorageError>;

    /// Persist the session, replacing any previous one
    fn save(&self, session: &Session) -> Result<(), StorageError>;

    /// Remove any persisted session
    fn clear(&self) -> Result<(), StorageError>;
}

/// Storage adapter errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// In-memory adapter: no persistence across processes
#[derive(Debug, Default)]
pub struct MemoryStorage {
    session: Mutex<Option<Session>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        Ok(self.session.lock().clone())
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        *self.session.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.session.lock() = None;
        Ok(())
    }
}

/// JSON-file adapter, the durable storage used across client restarts
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        // A corrupt session file is treated as logged-out, not fatal
        match serde_json::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
