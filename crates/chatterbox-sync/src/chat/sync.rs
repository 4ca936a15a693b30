//! Chat feed polling and posting.

use std::sync::Arc;

use chatterbox_common::SyncError;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::activity::ActivitySignal;
use crate::api::{ChatterTransport, PostOutcome, MAX_MESSAGE_CHARS};
use crate::poll::{PollHandle, PollOptions, PollScheduler, PollState, TwoSpeed};

use super::feed::{ChatFeed, ChatMerge};
use super::fetch::ChatFetch;

/// Chat-specific knobs on top of [`PollOptions`].
#[derive(Debug, Clone, Copy)]
pub struct ChatSyncConfig {
    pub policy: TwoSpeed,
    /// Messages requested by a snapshot fetch.
    pub snapshot_limit: u32,
    /// Starting room; `None` leaves it to the server.
    pub room: Option<u64>,
    pub max_messages: Option<usize>,
}

impl Default for ChatSyncConfig {
    fn default() -> Self {
        Self {
            policy: TwoSpeed::from_secs(45, 120),
            snapshot_limit: 30,
            room: None,
            max_messages: ChatMerge::default().max_messages,
        }
    }
}

/// Keeps a [`ChatFeed`] in sync with the chatter endpoint.
pub struct ChatFeedSync {
    transport: Arc<dyn ChatterTransport>,
    room: watch::Sender<Option<u64>>,
    poller: PollHandle<ChatFeed>,
}

impl ChatFeedSync {
    pub fn spawn(
        transport: Arc<dyn ChatterTransport>,
        gate: watch::Receiver<ActivitySignal>,
        config: ChatSyncConfig,
        options: PollOptions<ChatFeed>,
    ) -> Self {
        let (room, room_rx) = watch::channel(config.room);
        let fetch = ChatFetch {
            transport: Arc::clone(&transport),
            limit: config.snapshot_limit,
            room: room_rx,
        };
        let merge = ChatMerge {
            max_messages: config.max_messages,
        };
        let poller = PollScheduler::spawn(fetch, merge, config.policy, gate, options);
        Self {
            transport,
            room,
            poller,
        }
    }

    pub fn feed(&self) -> Option<ChatFeed> {
        self.poller.data()
    }

    pub fn state(&self) -> PollState<ChatFeed> {
        self.poller.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<PollState<ChatFeed>> {
        self.poller.subscribe()
    }

    pub fn room(&self) -> Option<u64> {
        *self.room.borrow()
    }

    /// Re-fetch the latest messages wholesale.
    pub fn refresh(&self) -> Result<(), SyncError> {
        self.poller.refresh()
    }

    /// Fetch only what arrived since the cursor.
    pub fn refresh_incremental(&self) -> Result<(), SyncError> {
        self.poller.refresh_incremental()
    }

    /// Scope the feed to another room. Moving into a room (from none or
    /// from a different one) triggers a snapshot.
    pub fn set_room(&self, room: Option<u64>) -> Result<(), SyncError> {
        let changed = self.room.send_if_modified(|current| {
            if *current == room {
                false
            } else {
                *current = room;
                true
            }
        });
        if changed && room.is_some() {
            debug!(room = ?room, "Chat room changed, refreshing");
            self.poller.refresh()?;
        }
        Ok(())
    }

    /// Post one line, then refresh so it shows up.
    pub async fn post_message(&self, text: &str) -> Result<PostOutcome, SyncError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SyncError::Validation("Message is empty".into()));
        }
        let len = text.chars().count();
        if len > MAX_MESSAGE_CHARS {
            return Err(SyncError::Validation(format!(
                "Message is too long ({len} characters, max {MAX_MESSAGE_CHARS})"
            )));
        }

        let outcome = self.transport.post_message(text).await?;
        if let Some(warning) = &outcome.warning {
            info!(warning = %warning, "Message posted with warning");
        }
        self.poller.refresh()?;
        Ok(outcome)
    }

    /// Purge the room's chat (privileged). The local feed is emptied at once.
    pub async fn clear_all(&self) -> Result<(), SyncError> {
        self.transport.clear_all().await?;
        info!(room = ?self.room(), "Chatter cleared");
        self.poller.update(|feed| {
            if let Some(feed) = feed {
                feed.clear();
            }
        })?;
        self.poller.refresh()
    }

    pub fn shutdown(&self) {
        self.poller.shutdown();
    }
}

impl std::fmt::Debug for ChatFeedSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatFeedSync")
            .field("room", &self.room())
            .field("poller", &self.poller)
            .finish()
    }
}
