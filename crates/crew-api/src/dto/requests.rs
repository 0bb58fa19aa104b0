//! Request DTOs for the backend API
//!
//! All request DTOs implement `Serialize` (camelCase on the wire) and
//! `Validate` for client-side input validation before the network call.

use serde::Serialize;
use validator::Validate;

use crew_core::UserId;

// ============================================================================
// Auth Requests
// ============================================================================

/// Login request; the identifier may be an email or a username
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email or username is required"))]
    pub email_or_username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Signup request
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(length(max = 64, message = "Display name must be at most 64 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

// ============================================================================
// Channel Requests
// ============================================================================

/// Create channel request (regular channels and DM pairings)
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub is_public: bool,

    /// Direct-message flag; omitted for regular channels
    #[serde(rename = "isDM", skip_serializing_if = "Option::is_none")]
    pub is_dm: Option<bool>,

    /// DM counterpart; set together with `is_dm`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<UserId>,
}

impl CreateChannelRequest {
    /// A regular (non-DM) channel
    #[must_use]
    pub fn channel(name: impl Into<String>, description: Option<String>, is_public: bool) -> Self {
        Self {
            name: name.into(),
            description,
            is_public,
            is_dm: None,
            recipient_id: None,
        }
    }

    /// A private DM pairing with the given recipient
    #[must_use]
    pub fn dm(name: impl Into<String>, description: Option<String>, recipient_id: UserId) -> Self {
        Self {
            name: name.into(),
            description,
            is_public: false,
            is_dm: Some(true),
            recipient_id: Some(recipient_id),
        }
    }
}

/// Update channel request; `created_by` transfers ownership
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,

    /// New owner; only the current creator may set this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
}

impl UpdateChannelRequest {
    /// Request transferring ownership to the given user
    #[must_use]
    pub fn transfer_to(user_id: UserId) -> Self {
        Self {
            created_by: Some(user_id),
            ..Self::default()
        }
    }
}

/// Join channel request; the password gates private channels
#[derive(Debug, Clone, Default, Serialize)]
pub struct JoinChannelRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Create message request
///
/// `channel_id` is a string on the wire even though channel ids are numeric
/// everywhere else; the backend expects it that way.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: String,

    pub channel_id: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update user profile request
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[validate(length(max = 64, message = "Display name must be at most 64 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Update password request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}
