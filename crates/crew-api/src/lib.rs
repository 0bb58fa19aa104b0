//! # crew-api
//!
//! HTTP layer for the Crew backend: a single authenticated request path,
//! uniform error normalization, and typed bindings for every endpoint the
//! client consumes.

pub mod client;
pub mod dto;
pub mod error;

// Re-export commonly used types at crate root
pub use client::ApiClient;
pub use dto::{
    CreateChannelRequest, CreateMessageRequest, JoinChannelRequest, LoginRequest, LoginResponse,
    SignupRequest, SignupResponse, UpdateChannelRequest, UpdatePasswordRequest, UpdateUserRequest,
};
pub use error::{ApiError, ApiResult};
