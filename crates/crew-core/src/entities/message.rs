//! Message entity - represents a chat message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{User, UserId};

/// Message entity as served by the backend
///
/// `author_id` is immutable once the message exists; the optional embedded
/// `author` is populated by the message-list endpoint for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub author_id: UserId,
    pub channel_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
}

impl Message {
    /// Check if the given user wrote this message
    #[inline]
    #[must_use]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    /// Author name for rendering, falling back when the author is not embedded
    #[must_use]
    pub fn author_label(&self) -> &str {
        self.author
            .as_ref()
            .map_or("unknown", |author| author.display_label())
    }

    /// Check if message content is empty after trimming
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
