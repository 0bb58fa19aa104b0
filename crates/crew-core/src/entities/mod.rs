//! Domain entities

mod channel;
mod message;
mod user;

pub use channel::Channel;
pub use message::Message;
pub use user::{User, UserId};
