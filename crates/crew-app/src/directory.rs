//! Channel directory and join flow
//!
//! Lists public channels alongside the caller's joined channels, and gates
//! joining: members go straight to chat, non-members get a join prompt that
//! asks for a password only on private channels.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use crew_api::{ApiClient, CreateChannelRequest, JoinChannelRequest};
use crew_core::Channel;

use crate::navigation::Navigation;

/// Outcome of clicking a channel in the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Already a member: open chat directly
    Open(Navigation),
    /// Not a member: show the join confirmation
    JoinPrompt {
        channel_id: i64,
        /// Private channels require a password field
        requires_password: bool,
    },
}

/// Outcome of submitting the join prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Joined; membership refreshed, navigate to chat
    Joined(Navigation),
    /// A join is already in flight; nothing was sent
    AlreadyJoining,
    /// Private channel without a password; rejected before any network call
    PasswordRequired,
    /// The server rejected the join; the prompt stays open with this message
    Rejected(String),
}

#[derive(Debug, Default)]
struct DirectoryState {
    channels: Vec<Channel>,
    my_channels: Vec<Channel>,
    error: Option<String>,
    loading: bool,
    joining: bool,
}

/// Channel directory view state
#[derive(Clone)]
pub struct Directory {
    client: ApiClient,
    state: Arc<Mutex<DirectoryState>>,
}

impl Directory {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(DirectoryState::default())),
        }
    }

    /// Protected view: redirect to login when no session is present
    #[must_use]
    pub fn guard(&self) -> Option<Navigation> {
        if self.client.store().is_authenticated() {
            None
        } else {
            Some(Navigation::Login)
        }
    }

    /// Fetch the public channel list and the caller's joined channels.
    ///
    /// A failure loading the joined list is non-fatal: the directory still
    /// renders and membership defaults to not-joined.
    #[instrument(skip(self))]
    pub async fn refresh(&self) {
        self.state.lock().loading = true;

        let (channels, my_channels) =
            tokio::join!(self.client.channels(), self.client.my_channels());

        let mut state = self.state.lock();
        state.loading = false;
        match channels {
            Ok(channels) => {
                debug!(count = channels.len(), "Loaded public channels");
                state.channels = channels;
                state.error = None;
            }
            Err(err) => state.error = Some(err.to_string()),
        }
        match my_channels {
            Ok(my_channels) => state.my_channels = my_channels,
            Err(err) => warn!(error = %err, "Failed to load joined channels"),
        }
    }

    /// Refetch only the joined list (after a successful join)
    async fn refresh_my_channels(&self) {
        match self.client.my_channels().await {
            Ok(my_channels) => self.state.lock().my_channels = my_channels,
            Err(err) => warn!(error = %err, "Failed to refresh joined channels"),
        }
    }

    /// Membership by channel id over the joined list
    #[must_use]
    pub fn is_member(&self, channel_id: i64) -> bool {
        self.state
            .lock()
            .my_channels
            .iter()
            .any(|channel| channel.id == channel_id)
    }

    /// Click a channel: members open chat, everyone else gets the join prompt
    #[must_use]
    pub fn select(&self, channel: &Channel) -> Selection {
        if self.is_member(channel.id) {
            Selection::Open(Navigation::Chat(channel.id))
        } else {
            Selection::JoinPrompt {
                channel_id: channel.id,
                requires_password: channel.requires_join_password(),
            }
        }
    }

    /// Submit the join prompt.
    ///
    /// Private channels without a non-empty password are rejected before any
    /// network call. On success the joined list is refreshed and the caller
    /// navigates to chat; on rejection the prompt stays open showing the
    /// server's message.
    #[instrument(skip(self, channel, password), fields(channel_id = channel.id))]
    pub async fn join(&self, channel: &Channel, password: Option<&str>) -> JoinOutcome {
        let password = password.map(str::trim).filter(|p| !p.is_empty());

        if channel.requires_join_password() && password.is_none() {
            return JoinOutcome::PasswordRequired;
        }

        {
            let mut state = self.state.lock();
            if state.joining {
                return JoinOutcome::AlreadyJoining;
            }
            state.joining = true;
        }

        let request = JoinChannelRequest {
            password: password.map(String::from),
        };
        let result = self.client.join_channel(channel.id, &request).await;
        self.state.lock().joining = false;

        match result {
            Ok(_) => {
                self.refresh_my_channels().await;
                JoinOutcome::Joined(Navigation::Chat(channel.id))
            }
            Err(err) => JoinOutcome::Rejected(err.to_string()),
        }
    }

    /// Create a channel, refresh both lists, and navigate into it
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: &CreateChannelRequest) -> Result<Navigation, String> {
        let channel = self
            .client
            .create_channel(request)
            .await
            .map_err(|err| err.to_string())?;
        self.refresh().await;
        Ok(Navigation::Chat(channel.id))
    }

    /// Cached public channels
    #[must_use]
    pub fn channels(&self) -> Vec<Channel> {
        self.state.lock().channels.clone()
    }

    /// Cached joined channels
    #[must_use]
    pub fn my_channels(&self) -> Vec<Channel> {
        self.state.lock().my_channels.clone()
    }

    /// Last directory-level error, if any
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Whether the initial load is still running
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }
}
