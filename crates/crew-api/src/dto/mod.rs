//! Request and response DTOs for the backend API

mod requests;
mod responses;

pub use requests::{
    CreateChannelRequest, CreateMessageRequest, JoinChannelRequest, LoginRequest, SignupRequest,
    UpdateChannelRequest, UpdatePasswordRequest, UpdateUserRequest,
};
pub use responses::{LoginResponse, SignupResponse};
