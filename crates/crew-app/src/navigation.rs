//! Navigation outcomes
//!
//! Flows never route; they tell the embedding shell where to go next.

/// Where the shell should navigate after a flow action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The login view (session missing or expired)
    Login,
    /// The channel directory
    Directory,
    /// The chat view for a channel
    Chat(i64),
}
