//! JSON fixtures in the backend's wire format

use serde_json::{json, Value};

use crew_core::{Channel, User};

/// A user document as the backend serves it
pub fn user_json(id: i64, username: &str, display_name: Option<&str>) -> Value {
    let mut value = json!({
        "id": id,
        "email": format!("{username}@example.com"),
        "username": username,
        "isActive": true,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    });
    if let Some(display_name) = display_name {
        value["displayName"] = json!(display_name);
    }
    value
}

/// A regular channel document
pub fn channel_json(id: i64, name: &str, is_public: bool, created_by: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "isPublic": is_public,
        "isDM": false,
        "createdBy": created_by,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

/// A DM channel document
pub fn dm_channel_json(id: i64, name: &str, created_by: i64, recipient_id: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "isPublic": false,
        "isDM": true,
        "recipientId": recipient_id,
        "createdBy": created_by,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

/// A message document
pub fn message_json(id: i64, content: &str, author_id: i64, channel_id: i64) -> Value {
    json!({
        "id": id,
        "content": content,
        "authorId": author_id,
        "channelId": channel_id,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

/// Parse a fixture back into the domain entity (for flow arguments)
pub fn user(id: i64, username: &str, display_name: Option<&str>) -> User {
    serde_json::from_value(user_json(id, username, display_name)).expect("valid user fixture")
}

/// Parse a channel fixture back into the domain entity
pub fn channel(id: i64, name: &str, is_public: bool, created_by: i64) -> Channel {
    serde_json::from_value(channel_json(id, name, is_public, created_by))
        .expect("valid channel fixture")
}
