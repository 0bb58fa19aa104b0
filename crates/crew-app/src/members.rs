//! Membership action resolution
//!
//! Clicking a member in the chat sidebar either starts (or resumes) a
//! direct-message thread or, for the channel creator, offers transferring
//! ownership to that member.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crew_api::{ApiClient, CreateChannelRequest, UpdateChannelRequest};
use crew_core::{Channel, User, UserId};

use crate::navigation::Navigation;

/// What clicking a member should present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAction {
    /// Clicked self: nothing happens
    None,
    /// Start (or resume) a direct-message thread
    DirectMessage,
    /// Creator clicked someone else: offer DM or ownership transfer
    Choose,
}

/// Decide the action for clicking `target` in `channel`'s member list
#[must_use]
pub fn action_for(channel: &Channel, me: UserId, target: UserId) -> MemberAction {
    if me == target {
        MemberAction::None
    } else if channel.is_owned_by(me) {
        MemberAction::Choose
    } else {
        MemberAction::DirectMessage
    }
}

/// Outcome of DM resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DmOutcome {
    /// Navigate to the existing or newly created DM channel
    Open(Navigation),
    /// A resolution is already in flight; nothing was done
    Busy,
    Failed(String),
}

/// Outcome of an ownership transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Transferred; carries the refreshed channel metadata
    Transferred(Channel),
    /// A transfer is already in flight; nothing was done
    Busy,
    /// The transfer failed; local state is unchanged
    Failed(String),
}

/// Member-click flows (DM start, ownership transfer)
#[derive(Clone)]
pub struct MemberActions {
    client: ApiClient,
    resolving: Arc<AtomicBool>,
    transferring: Arc<AtomicBool>,
}

impl MemberActions {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            resolving: Arc::new(AtomicBool::new(false)),
            transferring: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Find the DM channel pairing `me` with `target`, creating it when none
    /// exists, and report where to navigate.
    ///
    /// The search scans the caller's channels flagged as DMs and compares
    /// each member pair against `{me, target}` (order-insensitive). A
    /// member-list failure for one candidate skips that candidate rather
    /// than aborting the whole search. The scan-then-create is not atomic
    /// against a concurrent identical creation; deduplication is ultimately
    /// the backend's problem.
    #[instrument(skip(self, me, target), fields(me = me.id, target = target.id))]
    pub async fn resolve_dm(&self, me: &User, target: &User) -> DmOutcome {
        if me.id == target.id {
            return DmOutcome::Failed("Cannot start a direct message with yourself.".to_string());
        }
        if self.resolving.swap(true, Ordering::AcqRel) {
            return DmOutcome::Busy;
        }

        let outcome = self.resolve_dm_inner(me, target).await;
        self.resolving.store(false, Ordering::Release);
        outcome
    }

    async fn resolve_dm_inner(&self, me: &User, target: &User) -> DmOutcome {
        let channels = match self.client.my_channels().await {
            Ok(channels) => channels,
            Err(err) => return DmOutcome::Failed(err.to_string()),
        };

        for candidate in channels.iter().filter(|channel| channel.is_dm()) {
            let members = match self.client.channel_members(candidate.id).await {
                Ok(members) => members,
                Err(err) => {
                    warn!(channel_id = candidate.id, error = %err, "Skipping DM candidate");
                    continue;
                }
            };
            if is_pair(&members, me.id, target.id) {
                debug!(channel_id = candidate.id, "Reusing existing DM channel");
                return DmOutcome::Open(Navigation::Chat(candidate.id));
            }
        }

        let request = CreateChannelRequest::dm(
            dm_channel_name(me, target),
            Some(format!(
                "Direct messages between {} and {}",
                me.display_label(),
                target.display_label()
            )),
            target.id,
        );
        match self.client.create_channel(&request).await {
            Ok(channel) => {
                debug!(channel_id = channel.id, "Created DM channel");
                DmOutcome::Open(Navigation::Chat(channel.id))
            }
            Err(err) => DmOutcome::Failed(err.to_string()),
        }
    }

    /// Transfer channel ownership to `target` and return the refreshed
    /// channel metadata. Confirmation is the shell's responsibility; a
    /// failure leaves local state untouched.
    #[instrument(skip(self), fields(channel_id, target))]
    pub async fn transfer_ownership(&self, channel_id: i64, target: UserId) -> TransferOutcome {
        if self.transferring.swap(true, Ordering::AcqRel) {
            return TransferOutcome::Busy;
        }

        let request = UpdateChannelRequest::transfer_to(target);
        let result = match self.client.update_channel(channel_id, &request).await {
            Ok(_) => self.client.channel(channel_id).await,
            Err(err) => Err(err),
        };
        self.transferring.store(false, Ordering::Release);

        match result {
            Ok(channel) => TransferOutcome::Transferred(channel),
            Err(err) => TransferOutcome::Failed(err.to_string()),
        }
    }
}

/// Whether the member list is exactly the pair `{a, b}`, in any order
fn is_pair(members: &[User], a: UserId, b: UserId) -> bool {
    if members.len() != 2 {
        return false;
    }
    let mut ids = [members[0].id, members[1].id];
    ids.sort_unstable();
    let mut expected = [a, b];
    expected.sort_unstable();
    ids == expected
}

/// Deterministic DM channel name: both display labels lower-cased with
/// whitespace runs replaced by `-`, joined, suffixed `-dm`
fn dm_channel_name(a: &User, b: &User) -> String {
    format!("{}-{}-dm", name_slug(a.display_label()), name_slug(b.display_label()))
}

fn name_slug(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
