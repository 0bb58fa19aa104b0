//! # crew-core
//!
//! Domain layer containing the Crew entities as the backend serves them.
//! This crate has zero dependencies on infrastructure (HTTP, storage, etc.).

pub mod entities;

// Re-export commonly used types at crate root
pub use entities::{Channel, Message, User, UserId};
