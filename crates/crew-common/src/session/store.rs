//! Session store
//!
//! In-process cache over a `SessionStorage` adapter. Cloning the store is
//! cheap and all clones share the same state, so the HTTP client and the
//! flows observe logins and logouts immediately.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crew_core::User;

use super::storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};

/// Authenticated session: the logged-in user plus the bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

struct Inner {
    storage: Box<dyn SessionStorage>,
    current: RwLock<Option<Session>>,
}

/// Shared session store
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Create a store over the given adapter, loading any persisted session
    pub fn new(storage: impl SessionStorage + 'static) -> Result<Self, StorageError> {
        let current = storage.load()?;
        Ok(Self {
            inner: Arc::new(Inner {
                storage: Box::new(storage),
                current: RwLock::new(current),
            }),
        })
    }

    /// Memory-only store (no persistence across restarts)
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Inner {
                storage: Box::new(MemoryStorage::new()),
                current: RwLock::new(None),
            }),
        }
    }

    /// Store backed by a JSON session file
    pub fn with_file(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Self::new(FileStorage::new(path))
    }

    /// Persist and cache a session (login/signup/profile update)
    pub fn set(&self, session: Session) -> Result<(), StorageError> {
        self.inner.storage.save(&session)?;
        *self.inner.current.write() = Some(session);
        Ok(())
    }

    /// Drop the session everywhere (logout)
    pub fn clear(&self) -> Result<(), StorageError> {
        self.inner.storage.clear()?;
        *self.inner.current.write() = None;
        Ok(())
    }

    /// Current session, if logged in
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.inner.current.read().clone()
    }

    /// Bearer token, if logged in
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.current.read().as_ref().map(|s| s.token.clone())
    }

    /// Logged-in user, if any
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.inner.current.read().as_ref().map(|s| s.user.clone())
    }

    /// Authentication is derived from token presence
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.current.read().is_some()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
