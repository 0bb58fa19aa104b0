//! API client
//!
//! Single authenticated request path over `reqwest`, plus a typed method per
//! backend endpoint. Transport failures, non-2xx responses, and undecodable
//! bodies are all normalized into [`ApiError`].

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use validator::Validate;

use crew_common::{ClientConfig, Session, SessionStore};
use crew_core::{Channel, Message, User, UserId};

use crate::dto::{
    CreateChannelRequest, CreateMessageRequest, JoinChannelRequest, LoginRequest, LoginResponse,
    SignupRequest, SignupResponse, UpdateChannelRequest, UpdatePasswordRequest, UpdateUserRequest,
};
use crate::error::{extract_error_message, ApiError, ApiResult};

/// Authenticated HTTP client for the Crew backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore,
}

impl ApiClient {
    /// Build a client from configuration, sharing the given session store
    pub fn new(config: &ClientConfig, store: SessionStore) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(ApiError::Build)?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    /// The session store this client authenticates from
    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Backend base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    /// Issue a request and return the raw body on success.
    ///
    /// Attaches the bearer token when a session is present. A transport
    /// failure becomes [`ApiError::Unreachable`]; a non-2xx response becomes
    /// [`ApiError::Http`] with the message extracted from the error body.
    async fn dispatch<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, %url, "API request");

        let mut request = self.http.request(method, &url);
        if let Some(token) = self.store.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => {
                warn!(%url, error = %source, "Backend unreachable");
                return Err(ApiError::Unreachable {
                    url: self.base_url.clone(),
                    source,
                });
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: extract_error_message(status.as_u16(), &body),
            });
        }

        Ok(body)
    }

    /// Issue a request and decode the JSON response
    async fn request_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let raw = self.dispatch(method, path, body).await?;
        serde_json::from_str(&raw).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// Issue a request and discard any response body (204 and friends)
    async fn request_no_content<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<()> {
        self.dispatch(method, path, body).await.map(|_| ())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request_json::<T, ()>(Method::GET, path, None).await
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Log in and persist the resulting session
    #[instrument(skip(self, request), fields(identifier = %request.email_or_username))]
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        request.validate()?;

        let response: LoginResponse = self
            .request_json(Method::POST, "/auth/login", Some(request))
            .await?;

        self.store.set(Session {
            user: response.user.clone(),
            token: response.access_token.clone(),
        })?;

        debug!(user_id = response.user.id, "Logged in");
        Ok(response)
    }

    /// Create an account, then log straight in with the same credentials
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<SignupResponse> {
        request.validate()?;

        let response: SignupResponse = self
            .request_json(Method::POST, "/auth/signup", Some(request))
            .await?;

        self.login(&LoginRequest {
            email_or_username: request.email.clone(),
            password: request.password.clone(),
        })
        .await?;

        Ok(response)
    }

    /// Drop the local session; the backend keeps no server-side session
    pub fn logout(&self) -> ApiResult<()> {
        self.store.clear()?;
        Ok(())
    }

    // ========================================================================
    // Channels
    // ========================================================================

    /// All public channels
    pub async fn channels(&self) -> ApiResult<Vec<Channel>> {
        self.get("/channels").await
    }

    /// Channels the caller has joined (including DMs)
    pub async fn my_channels(&self) -> ApiResult<Vec<Channel>> {
        self.get("/channels/my-channels").await
    }

    /// A single channel's metadata
    pub async fn channel(&self, id: i64) -> ApiResult<Channel> {
        self.get(&format!("/channels/{id}")).await
    }

    /// Members of a channel
    pub async fn channel_members(&self, id: i64) -> ApiResult<Vec<User>> {
        self.get(&format!("/channels/{id}/members")).await
    }

    /// Create a channel (regular or DM)
    pub async fn create_channel(&self, request: &CreateChannelRequest) -> ApiResult<Channel> {
        request.validate()?;
        self.request_json(Method::POST, "/channels", Some(request))
            .await
    }

    /// Update a channel; setting `created_by` transfers ownership
    pub async fn update_channel(
        &self,
        id: i64,
        request: &UpdateChannelRequest,
    ) -> ApiResult<Channel> {
        request.validate()?;
        self.request_json(Method::PATCH, &format!("/channels/{id}"), Some(request))
            .await
    }

    /// Delete a channel (creator only, enforced server-side)
    pub async fn delete_channel(&self, id: i64) -> ApiResult<()> {
        self.request_no_content::<()>(Method::DELETE, &format!("/channels/{id}"), None)
            .await
    }

    /// Join a channel; private channels require the password
    pub async fn join_channel(&self, id: i64, request: &JoinChannelRequest) -> ApiResult<Channel> {
        self.request_json(Method::POST, &format!("/channels/{id}/join"), Some(request))
            .await
    }

    /// Leave a channel
    pub async fn leave_channel(&self, id: i64) -> ApiResult<()> {
        self.request_no_content::<()>(Method::POST, &format!("/channels/{id}/leave"), None)
            .await
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// Full message list for a channel (no pagination)
    pub async fn channel_messages(&self, channel_id: i64) -> ApiResult<Vec<Message>> {
        self.get(&format!("/messages/channel/{channel_id}")).await
    }

    /// Post a message
    pub async fn send_message(&self, request: &CreateMessageRequest) -> ApiResult<Message> {
        request.validate()?;
        self.request_json(Method::POST, "/messages", Some(request))
            .await
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Fetch a user by id
    pub async fn user(&self, id: UserId) -> ApiResult<User> {
        self.get(&format!("/users/{id}")).await
    }

    /// Update a user's profile
    pub async fn update_user(&self, id: UserId, request: &UpdateUserRequest) -> ApiResult<User> {
        request.validate()?;
        self.request_json(Method::PATCH, &format!("/users/{id}"), Some(request))
            .await
    }

    /// Change a user's password
    pub async fn update_password(
        &self,
        id: UserId,
        request: &UpdatePasswordRequest,
    ) -> ApiResult<()> {
        request.validate()?;
        self.request_no_content(Method::PATCH, &format!("/users/{id}/password"), Some(request))
            .await
    }
}
