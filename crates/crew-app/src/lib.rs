//! # crew-app
//!
//! Application flows for the Crew client: the channel directory with its
//! join gate, the polling chat session, membership action resolution
//! (DM start and ownership transfer), and profile updates.
//!
//! Flows hold their own view state and report where the shell should
//! navigate via [`Navigation`]; rendering is entirely up to the embedding
//! front-end.

pub mod chat;
pub mod directory;
pub mod members;
pub mod navigation;
pub mod profile;

// Re-export commonly used types at crate root
pub use chat::{ChatSession, DeleteOutcome, LeaveOutcome, SendOutcome};
pub use directory::{Directory, JoinOutcome, Selection};
pub use members::{DmOutcome, MemberAction, MemberActions, TransferOutcome};
pub use navigation::Navigation;
pub use profile::Profile;
