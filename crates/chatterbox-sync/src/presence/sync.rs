//! Presence polling plus the one-shot room actions.

use std::sync::Arc;
use std::time::Duration;

use chatterbox_common::SyncError;
use futures_util::FutureExt;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::activity::ActivitySignal;
use crate::api::{ChatterTransport, RoomActionResponse};
use crate::poll::{
    Fetch, FetchFuture, FetchMode, FixedInterval, PollHandle, PollOptions, PollScheduler,
    PollState, Replace,
};

use super::types::RoomSnapshot;

/// Presence is a current-state concept: every fetch is a full snapshot.
struct RoomFetch {
    transport: Arc<dyn ChatterTransport>,
}

impl Fetch<RoomSnapshot> for RoomFetch {
    type Batch = RoomSnapshot;

    fn fetch(&self, _mode: FetchMode, _current: Option<&RoomSnapshot>) -> FetchFuture<RoomSnapshot> {
        let transport = Arc::clone(&self.transport);
        async move { transport.fetch_room().await }.boxed()
    }
}

/// Keeps the room / other-users snapshot current.
pub struct PresenceSync {
    transport: Arc<dyn ChatterTransport>,
    poller: PollHandle<RoomSnapshot>,
}

impl PresenceSync {
    pub fn spawn(
        transport: Arc<dyn ChatterTransport>,
        gate: watch::Receiver<ActivitySignal>,
        interval: Duration,
        options: PollOptions<RoomSnapshot>,
    ) -> Self {
        let poller = PollScheduler::spawn(
            RoomFetch {
                transport: Arc::clone(&transport),
            },
            Replace,
            FixedInterval(interval),
            gate,
            options,
        );
        Self { transport, poller }
    }

    pub fn snapshot(&self) -> Option<RoomSnapshot> {
        self.poller.data()
    }

    pub fn state(&self) -> PollState<RoomSnapshot> {
        self.poller.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<PollState<RoomSnapshot>> {
        self.poller.subscribe()
    }

    pub fn refresh(&self) -> Result<(), SyncError> {
        self.poller.refresh()
    }

    /// Move to another room. `Ok(None)` when already there.
    pub async fn change_room(&self, room_id: u64) -> Result<Option<RoomActionResponse>, SyncError> {
        if let Some(snapshot) = self.snapshot() {
            if snapshot.current_room_id == Some(room_id) {
                return Ok(None);
            }
            if let Some(suspension) = &snapshot.suspension {
                return Err(SyncError::Validation(suspension.describe(chrono::Utc::now())));
            }
        }

        let response = self.transport.change_room(room_id).await?;
        info!(room_id, room = ?response.room_name, "Changed room");
        self.reconcile(&response);
        Ok(Some(response))
    }

    /// Toggle cloak. The snapshot flips immediately and is rolled back if
    /// the server refuses.
    pub async fn set_cloaked(&self, cloaked: bool) -> Result<RoomActionResponse, SyncError> {
        let previous = self.snapshot().map(|s| {
            if !s.can_cloak {
                return Err(SyncError::Validation("You cannot cloak".into()));
            }
            Ok(s.is_cloaked)
        });
        let previous = previous.transpose()?;

        self.set_cloak_flag(cloaked);
        match self.transport.set_cloaked(cloaked).await {
            Ok(response) => {
                debug!(cloaked, "Cloak updated");
                self.reconcile(&response);
                Ok(response)
            }
            Err(e) => {
                warn!(cloaked, error = %e, "Cloak toggle failed, rolling back");
                if let Some(previous) = previous {
                    self.set_cloak_flag(previous);
                }
                Err(e)
            }
        }
    }

    /// Create a room and join it.
    pub async fn create_room(&self, title: &str, doctext: &str) -> Result<RoomActionResponse, SyncError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SyncError::Validation("Room title is required".into()));
        }
        if let Some(snapshot) = self.snapshot() {
            if snapshot.create_room_suspended {
                return Err(SyncError::Validation(
                    "Room creation is suspended for you".into(),
                ));
            }
        }

        let response = self.transport.create_room(title, doctext).await?;
        info!(title, "Created room");
        self.reconcile(&response);
        Ok(response)
    }

    pub fn shutdown(&self) {
        self.poller.shutdown();
    }

    fn set_cloak_flag(&self, cloaked: bool) {
        let updated = self.poller.update(move |data| {
            if let Some(snapshot) = data {
                snapshot.is_cloaked = cloaked;
            }
        });
        if let Err(e) = updated {
            debug!(cloaked, error = %e, "Cloak flag not applied");
        }
    }

    /// Adopt the snapshot the server sent back, then re-fetch to converge.
    fn reconcile(&self, response: &RoomActionResponse) {
        if let Some(snapshot) = &response.other_users_data {
            if let Err(e) = self.poller.set_data(snapshot.clone()) {
                debug!(error = %e, "Presence snapshot from response dropped");
            }
        }
        if let Err(e) = self.poller.refresh() {
            debug!(error = %e, "Presence refresh skipped");
        }
    }
}

impl std::fmt::Debug for PresenceSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceSync")
            .field("poller", &self.poller)
            .finish()
    }
}
