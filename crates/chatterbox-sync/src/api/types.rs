//! Request and response shapes for the chatter and chatroom endpoints.

use chatterbox_common::SyncError;
use serde::{Deserialize, Serialize};

use crate::chat::Cursor;
use crate::presence::RoomSnapshot;

/// Longest chat line the server accepts.
pub const MAX_MESSAGE_CHARS: usize = 512;

/// Parameters for `GET /api/chatter/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatterQuery {
    /// The newest `limit` messages.
    Latest { limit: u32, room: Option<u64> },
    /// Everything strictly after `since`.
    Since { since: Cursor, room: Option<u64> },
}

impl ChatterQuery {
    pub fn room(&self) -> Option<u64> {
        match self {
            ChatterQuery::Latest { room, .. } | ChatterQuery::Since { room, .. } => *room,
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = match self {
            ChatterQuery::Latest { limit, .. } => vec![("limit", limit.to_string())],
            ChatterQuery::Since { since, .. } => vec![("since", since.to_string())],
        };
        if let Some(room) = self.room() {
            params.push(("room", room.to_string()));
        }
        params
    }
}

// ---------------------------------------------------------------------------
// Posting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PostRequest<'a> {
    pub message: &'a str,
}

/// Raw `POST /api/chatter/create` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostResponse {
    #[serde(default)]
    pub success: bool,
    pub warning: Option<String>,
    pub error: Option<String>,
    #[serde(default)]
    pub poll_messages: bool,
    #[serde(default)]
    pub ignores: bool,
    /// Per-recipient delivery failures for group messages.
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

/// A successfully posted line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostOutcome {
    /// Partial success, e.g. some recipients blocking the sender.
    pub warning: Option<String>,
    /// The server suggests refreshing private messages too.
    pub poll_messages: bool,
}

impl PostResponse {
    pub fn into_outcome(self) -> Result<PostOutcome, SyncError> {
        if self.ignores {
            return Err(SyncError::Ignored);
        }
        if !self.success {
            let message = self
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "message was not posted".to_string());
            return Err(SyncError::Rejected(message));
        }

        let warning = self.warning.filter(|w| !w.is_empty()).or_else(|| {
            (!self.errors.is_empty()).then(|| {
                let n = self.errors.len();
                let noun = if n == 1 { "user is" } else { "users are" };
                format!("Message sent, but {n} {noun} blocking you")
            })
        });

        Ok(PostOutcome {
            warning,
            poll_messages: self.poll_messages,
        })
    }
}

// ---------------------------------------------------------------------------
// Room actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChangeRoomRequest {
    pub room_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SetCloakedRequest {
    pub cloaked: u8,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateRoomRequest<'a> {
    pub room_title: &'a str,
    pub room_doctext: &'a str,
}

/// Response to change_room, set_cloaked and create_room.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RoomActionResponse {
    #[serde(default)]
    pub success: bool,
    /// Fresh presence snapshot, when the server includes one.
    #[serde(rename = "otherUsersData")]
    pub other_users_data: Option<RoomSnapshot>,
    pub room_name: Option<String>,
    pub room_topic: Option<String>,
    pub error: Option<String>,
}

impl RoomActionResponse {
    /// A non-empty `error` means the action was refused.
    pub fn into_result(self) -> Result<Self, SyncError> {
        match self.error.as_deref() {
            Some(e) if !e.is_empty() => Err(SyncError::Rejected(e.to_string())),
            _ => Ok(self),
        }
    }
}
