//! Presence snapshot returned by `GET /api/chatroom/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Room, user-count and suspension state. Always replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomSnapshot {
    pub user_count: u32,
    /// Pre-rendered link to the current room.
    pub current_room: Option<String>,
    pub current_room_id: Option<u64>,
    /// Other users, grouped by room.
    pub rooms: Vec<RoomGroup>,
    pub available_rooms: Vec<AvailableRoom>,
    pub can_cloak: bool,
    pub is_cloaked: bool,
    /// Set while the user may not leave the current room.
    pub suspension: Option<Suspension>,
    pub can_create_room: bool,
    pub create_room_suspended: bool,
}

impl RoomSnapshot {
    pub fn users(&self) -> impl Iterator<Item = &RoomUser> {
        self.rooms.iter().flat_map(|r| r.users.iter())
    }

    pub fn room_title(&self, room_id: u64) -> Option<&str> {
        self.available_rooms
            .iter()
            .find(|r| r.room_id == room_id)
            .map(|r| r.title.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomGroup {
    pub title: String,
    pub users: Vec<RoomUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomUser {
    pub user_id: u64,
    pub display_name: String,
    pub is_current_user: bool,
    /// Badges (staff, new user, borged, ...). Shape varies by flag.
    pub flags: Vec<serde_json::Value>,
    /// Recent action or noding, if any.
    pub action: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableRoom {
    pub room_id: u64,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuspensionKind {
    Temporary,
    Indefinite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suspension {
    #[serde(rename = "type")]
    pub kind: SuspensionKind,
    pub seconds_remaining: Option<i64>,
    /// Unix seconds.
    pub started_at: Option<i64>,
    /// Seconds.
    pub duration: Option<i64>,
}

impl Suspension {
    /// Seconds left as of `now` on the local clock, `None` when indefinite.
    ///
    /// With a start and duration the countdown is recomputed locally;
    /// otherwise the server's figure is used as-is. Skew between the two
    /// clocks is not corrected.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<i64> {
        if self.kind == SuspensionKind::Indefinite {
            return None;
        }
        match (self.started_at, self.duration) {
            (Some(started_at), Some(duration)) => {
                Some((started_at + duration - now.timestamp()).max(0))
            }
            _ => self.seconds_remaining.map(|s| s.max(0)),
        }
    }

    pub fn describe(&self, now: DateTime<Utc>) -> String {
        match self.remaining_at(now) {
            Some(secs) => format!("Locked here for {secs} seconds"),
            None => "Locked here indefinitely".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "userCount": 3,
        "currentRoom": "<a href=\"/node/123\">Main Room</a>",
        "currentRoomId": 123,
        "availableRooms": [
            { "room_id": 0, "title": "outside" },
            { "room_id": 123, "title": "Main Room" }
        ],
        "rooms": [{
            "title": "",
            "users": [
                { "userId": 1, "displayName": "alice", "isCurrentUser": true, "flags": ["@"], "action": null },
                { "userId": 2, "displayName": "bob", "isCurrentUser": false, "flags": [{"type": "newuser", "days": 3}],
                  "action": {"type": "action", "verb": "eating", "noun": "pie"} }
            ]
        }],
        "canCloak": true,
        "isCloaked": false,
        "suspension": null,
        "canCreateRoom": true,
        "createRoomSuspended": false
    }"#;

    #[test]
    fn deserializes_snapshot() {
        let snap: RoomSnapshot = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(snap.user_count, 3);
        assert_eq!(snap.current_room_id, Some(123));
        assert_eq!(snap.users().count(), 2);
        assert_eq!(snap.room_title(0), Some("outside"));
        assert!(snap.can_cloak);
        assert!(snap.suspension.is_none());
    }

    #[test]
    fn missing_fields_default() {
        let snap: RoomSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snap, RoomSnapshot::default());
    }

    #[test]
    fn temporary_suspension_counts_down_locally() {
        let s: Suspension = serde_json::from_str(
            r#"{"type": "temporary", "seconds_remaining": 90, "started_at": 1000, "duration": 120}"#,
        )
        .unwrap();
        let now = DateTime::from_timestamp(1030, 0).unwrap();
        assert_eq!(s.remaining_at(now), Some(90));

        let later = DateTime::from_timestamp(1100, 0).unwrap();
        assert_eq!(s.remaining_at(later), Some(20));

        let past = DateTime::from_timestamp(5000, 0).unwrap();
        assert_eq!(s.remaining_at(past), Some(0));
    }

    #[test]
    fn suspension_without_start_uses_server_figure() {
        let s: Suspension =
            serde_json::from_str(r#"{"type": "temporary", "seconds_remaining": 42}"#).unwrap();
        assert_eq!(s.describe(Utc::now()), "Locked here for 42 seconds");
    }

    #[test]
    fn indefinite_suspension() {
        let s: Suspension = serde_json::from_str(r#"{"type": "indefinite"}"#).unwrap();
        assert_eq!(s.remaining_at(Utc::now()), None);
        assert_eq!(s.describe(Utc::now()), "Locked here indefinitely");
    }
}
