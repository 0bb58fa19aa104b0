//! Chat session
//!
//! Per-channel state machine: concurrent initial load, interval-based
//! message polling with full-replace semantics, guarded sends, and the
//! leave/delete actions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crew_api::{ApiClient, ApiError, CreateMessageRequest};
use crew_core::{Channel, Message, User};

use crate::navigation::Navigation;

const INVALID_CHANNEL: &str = "Invalid channel ID.";
const DELETE_DENIED: &str = "Only the channel creator can delete this channel.";

/// Outcome of submitting the message input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Posted and the message list was refreshed immediately
    Sent,
    /// Whitespace-only content or a send already in flight; nothing was sent
    Ignored,
    /// The send failed; the draft should be kept
    Failed(String),
}

/// Outcome of leaving the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Left; navigate back to the directory
    Left(Navigation),
    Failed(String),
}

/// Outcome of deleting the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Deleted; navigate back to the directory
    Deleted(Navigation),
    /// Rejected client-side: the current user is not the creator
    Denied(String),
    Failed(String),
}

#[derive(Debug, Default)]
struct ChatState {
    channel: Option<Channel>,
    messages: Vec<Message>,
    members: Vec<User>,
    error: Option<String>,
    loading: bool,
    sending: bool,
}

/// Chat view state for one channel
///
/// Clones share state, so the polling task and the view observe the same
/// session. Callers must invoke [`ChatSession::close`] on teardown to stop
/// polling; results of requests already in flight at that point are
/// discarded via a generation stamp.
#[derive(Clone)]
pub struct ChatSession {
    client: ApiClient,
    /// Raw route parameter; empty or non-numeric ids short-circuit to an
    /// error state without touching the network
    channel_id: String,
    poll_interval: Duration,
    state: Arc<Mutex<ChatState>>,
    generation: Arc<AtomicU64>,
    poll_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl ChatSession {
    #[must_use]
    pub fn new(client: ApiClient, channel_id: impl Into<String>, poll_interval: Duration) -> Self {
        Self {
            client,
            channel_id: channel_id.into(),
            poll_interval,
            state: Arc::new(Mutex::new(ChatState {
                loading: true,
                ..ChatState::default()
            })),
            generation: Arc::new(AtomicU64::new(0)),
            poll_task: Arc::new(Mutex::new(None)),
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

    /// Numeric channel id, `None` for empty/invalid route parameters
    fn channel_key(&self) -> Option<i64> {
        self.channel_id.trim().parse().ok()
    }

    fn fail_invalid_channel(&self) {
        let mut state = self.state.lock();
        state.error = Some(INVALID_CHANNEL.to_string());
        state.loading = false;
    }

    /// Initial load: channel metadata, message list, and member list,
    /// fetched concurrently. Each failure is captured independently so a
    /// metadata error still leaves messages usable and vice versa.
    #[instrument(skip(self), fields(channel_id = %self.channel_id))]
    pub async fn load(&self) {
        let Some(id) = self.channel_key() else {
            self.fail_invalid_channel();
            return;
        };

        let generation = self.generation.load(Ordering::Acquire);
        let (channel, messages, members) = tokio::join!(
            self.client.channel(id),
            self.client.channel_messages(id),
            self.client.channel_members(id),
        );
        if self.generation.load(Ordering::Acquire) != generation {
            return;
        }

        let mut state = self.state.lock();
        state.loading = false;
        match channel {
            Ok(channel) => state.channel = Some(channel),
            Err(err) => state.error = Some(err.to_string()),
        }
        match messages {
            Ok(messages) => {
                debug!(count = messages.len(), "Loaded messages");
                state.messages = messages;
                state.error = None;
            }
            Err(err) => state.error = Some(err.to_string()),
        }
        match members {
            Ok(members) => state.members = members,
            Err(err) => warn!(error = %err, "Failed to load member list"),
        }
    }

    /// Refetch the full message list, replacing the current one.
    ///
    /// Clears the view error on success; a fetch error is surfaced but never
    /// stops future polls. Results arriving after [`ChatSession::close`] are
    /// dropped.
    pub async fn refresh_messages(&self) {
        let Some(id) = self.channel_key() else {
            self.fail_invalid_channel();
            return;
        };

        let generation = self.generation.load(Ordering::Acquire);
        let result = self.client.channel_messages(id).await;
        if self.generation.load(Ordering::Acquire) != generation {
            return;
        }

        let mut state = self.state.lock();
        state.loading = false;
        match result {
            Ok(messages) => {
                state.messages = messages;
                state.error = None;
            }
            Err(err) => state.error = Some(err.to_string()),
        }
    }

    /// Start the polling task, replacing any previous one.
    ///
    /// Refetches the message list at the configured cadence until
    /// [`ChatSession::close`] is called.
    pub fn spawn_polling(&self) {
        let session = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(session.poll_interval);
            // The first tick completes immediately; load() already fetched
            ticker.tick().await;
            loop {
                ticker.tick().await;
                session.refresh_messages().await;
            }
        });

        let mut task = self.poll_task.lock();
        if let Some(previous) = task.replace(handle) {
            previous.abort();
        }
    }

    /// Teardown: cancel polling and invalidate in-flight request results
    pub fn close(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(handle) = self.poll_task.lock().take() {
            handle.abort();
        }
    }

    /// Submit the message input.
    ///
    /// Whitespace-only drafts and concurrent sends are silent no-ops with no
    /// network call. A successful send forces an immediate message refetch
    /// instead of waiting for the next poll tick.
    #[instrument(skip(self, content), fields(channel_id = %self.channel_id))]
    pub async fn send(&self, content: &str) -> SendOutcome {
        let content = content.trim();
        if content.is_empty() {
            return SendOutcome::Ignored;
        }
        let Some(id) = self.channel_key() else {
            self.fail_invalid_channel();
            return SendOutcome::Failed(INVALID_CHANNEL.to_string());
        };

        {
            let mut state = self.state.lock();
            if state.sending {
                return SendOutcome::Ignored;
            }
            state.sending = true;
        }

        let request = CreateMessageRequest {
            content: content.to_string(),
            channel_id: id.to_string(),
        };
        let result = self.client.send_message(&request).await;
        self.state.lock().sending = false;

        match result {
            Ok(_) => {
                self.refresh_messages().await;
                SendOutcome::Sent
            }
            Err(err) => {
                let message = err.to_string();
                self.state.lock().error = Some(message.clone());
                SendOutcome::Failed(message)
            }
        }
    }

    /// Leave the channel. Confirmation is the shell's responsibility; on
    /// success the caller navigates back to the directory.
    #[instrument(skip(self), fields(channel_id = %self.channel_id))]
    pub async fn leave(&self) -> LeaveOutcome {
        let Some(id) = self.channel_key() else {
            return LeaveOutcome::Failed(INVALID_CHANNEL.to_string());
        };

        match self.client.leave_channel(id).await {
            Ok(()) => {
                self.close();
                LeaveOutcome::Left(Navigation::Directory)
            }
            Err(err) => {
                let message = err.to_string();
                self.state.lock().error = Some(message.clone());
                LeaveOutcome::Failed(message)
            }
        }
    }

    /// Delete the channel.
    ///
    /// Rejected before any network call unless the current user is the
    /// channel creator. That check is a UX affordance only; the backend
    /// enforces the real permission and its failures map to distinct
    /// user-facing messages per status.
    #[instrument(skip(self), fields(channel_id = %self.channel_id))]
    pub async fn delete(&self) -> DeleteOutcome {
        let Some(id) = self.channel_key() else {
            return DeleteOutcome::Failed(INVALID_CHANNEL.to_string());
        };

        let is_creator = match (
            self.client.store().current_user(),
            self.state.lock().channel.as_ref(),
        ) {
            (Some(me), Some(channel)) => channel.is_owned_by(me.id),
            _ => false,
        };
        if !is_creator {
            return DeleteOutcome::Denied(DELETE_DENIED.to_string());
        }

        match self.client.delete_channel(id).await {
            Ok(()) => {
                self.close();
                DeleteOutcome::Deleted(Navigation::Directory)
            }
            Err(err) => {
                let message = delete_error_message(&err);
                self.state.lock().error = Some(message.clone());
                DeleteOutcome::Failed(message)
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn channel(&self) -> Option<Channel> {
        self.state.lock().channel.clone()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.state.lock().messages.clone()
    }

    #[must_use]
    pub fn members(&self) -> Vec<User> {
        self.state.lock().members.clone()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.state.lock().sending
    }

    /// Whether the logged-in user wrote the given message
    #[must_use]
    pub fn is_own_message(&self, message: &Message) -> bool {
        self.client
            .store()
            .current_user()
            .is_some_and(|me| message.is_authored_by(me.id))
    }
}

/// Map delete-channel failures to user-facing text per status code
fn delete_error_message(err: &ApiError) -> String {
    match err.status() {
        Some(401) => "Your session has expired. Log in again.".to_string(),
        Some(403) => DELETE_DENIED.to_string(),
        Some(404) => "This channel no longer exists.".to_string(),
        Some(status) if (500..600).contains(&status) => {
            "The server failed to delete the channel. Try again later.".to_string()
        }
        _ => err.to_string(),
    }
}
