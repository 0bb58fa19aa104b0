//! Response DTOs for the backend API
//!
//! Most endpoints return domain entities directly; only the auth endpoints
//! wrap them.

use serde::Deserialize;

use crew_core::User;

/// Login response: the authenticated user plus the bearer token
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
}

/// Signup response
#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub user: User,
}
