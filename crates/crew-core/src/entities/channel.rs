//! Channel entity - represents a public room, a private room, or a DM pairing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Channel entity as served by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_public: bool,
    /// Direct-message flag; DM channels always have exactly two members
    #[serde(default, rename = "isDM")]
    pub is_dm: bool,
    /// Counterpart of the DM creator, set only on DM channels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<UserId>,
    /// Creator/owner; the only user permitted to update, delete, or transfer
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    /// Check if this channel is private
    #[inline]
    #[must_use]
    pub fn is_private(&self) -> bool {
        !self.is_public
    }

    /// Check if this channel is a direct-message pairing
    #[inline]
    #[must_use]
    pub fn is_dm(&self) -> bool {
        self.is_dm
    }

    /// Check if the given user created (owns) this channel
    #[inline]
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.created_by == user_id
    }

    /// Joining prompts for a password only on private channels
    #[inline]
    #[must_use]
    pub fn requires_join_password(&self) -> bool {
        self.is_private()
    }
}
