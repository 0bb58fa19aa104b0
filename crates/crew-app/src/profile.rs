//! Profile flows
//!
//! Simple update forms: profile fields and password. The stored session's
//! user is refreshed after a successful profile update so the rest of the
//! client sees the new identity immediately.

use tracing::instrument;

use crew_api::{ApiClient, ApiResult, UpdatePasswordRequest, UpdateUserRequest};
use crew_common::Session;
use crew_core::{User, UserId};

/// Profile/settings flows
#[derive(Debug, Clone)]
pub struct Profile {
    client: ApiClient,
}

impl Profile {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Update profile fields and refresh the persisted session's user
    #[instrument(skip(self, request))]
    pub async fn update(&self, user_id: UserId, request: &UpdateUserRequest) -> ApiResult<User> {
        let user = self.client.update_user(user_id, request).await?;

        if let Some(session) = self.client.store().session() {
            if session.user.id == user.id {
                self.client.store().set(Session {
                    user: user.clone(),
                    token: session.token,
                })?;
            }
        }

        Ok(user)
    }

    /// Change the password; length rules are validated before the call
    #[instrument(skip(self, password))]
    pub async fn change_password(&self, user_id: UserId, password: &str) -> ApiResult<()> {
        let request = UpdatePasswordRequest {
            password: password.to_string(),
        };
        self.client.update_password(user_id, &request).await
    }
}
