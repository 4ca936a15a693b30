//! The HTTP collaborator seam.

use async_trait::async_trait;
use chatterbox_common::SyncError;

use crate::chat::ChatMessage;
use crate::presence::RoomSnapshot;

use super::types::{ChatterQuery, PostOutcome, RoomActionResponse};

/// Every server call the engine makes.
///
/// Application-level failures embedded in a 2xx payload come back as
/// [`SyncError::Rejected`] or [`SyncError::Ignored`], never as transport
/// errors.
#[async_trait]
pub trait ChatterTransport: Send + Sync {
    /// `GET /api/chatter/`. Newest first.
    async fn fetch_chatter(&self, query: &ChatterQuery) -> Result<Vec<ChatMessage>, SyncError>;

    /// `POST /api/chatter/create`.
    async fn post_message(&self, message: &str) -> Result<PostOutcome, SyncError>;

    /// `POST /api/chatter/clear_all`. Privileged.
    async fn clear_all(&self) -> Result<(), SyncError>;

    /// `GET /api/chatroom/`.
    async fn fetch_room(&self) -> Result<RoomSnapshot, SyncError>;

    /// `POST /api/chatroom/change_room`.
    async fn change_room(&self, room_id: u64) -> Result<RoomActionResponse, SyncError>;

    /// `POST /api/chatroom/set_cloaked`.
    async fn set_cloaked(&self, cloaked: bool) -> Result<RoomActionResponse, SyncError>;

    /// `POST /api/chatroom/create_room`.
    async fn create_room(&self, title: &str, doctext: &str)
        -> Result<RoomActionResponse, SyncError>;
}
