//! User entity - represents a Crew account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend user identifier (numeric, JSON number on the wire)
pub type UserId = i64;

/// User entity as served by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name to show in member lists and message bubbles: display name,
    /// falling back to the username.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    /// Check if the account is active
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}
