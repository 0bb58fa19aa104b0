//! Session management
//!
//! Holds the authenticated `{user, token}` pair behind a pluggable
//! persistence adapter so the rest of the client never touches storage
//! directly.

mod storage;
mod store;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
pub use store::{Session, SessionStore};
