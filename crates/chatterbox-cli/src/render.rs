//! Terminal rendering of the feed and presence state.

use std::collections::HashSet;

use chatterbox_common::SyncError;
use chatterbox_sync::chat::ChatMessage;
use chatterbox_sync::presence::RoomSnapshot;
use chatterbox_sync::{classify, ChatFeed};
use chrono::{DateTime, Local};

/// `HH:MM` in local time, or the raw timestamp if it does not parse.
pub fn short_time(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

pub fn format_line(msg: &ChatMessage) -> String {
    let line = classify(&msg.msgtext).render_plain(&msg.author.title);
    format!("[{}] {line}", short_time(&msg.timestamp))
}

/// Remembers which messages were printed so each shows up once.
#[derive(Debug, Default)]
pub struct FeedPrinter {
    seen: HashSet<u64>,
    last_error: Option<String>,
}

impl FeedPrinter {
    /// Lines not printed before, oldest first.
    pub fn new_lines(&mut self, feed: &ChatFeed) -> Vec<String> {
        feed.oldest_first()
            .filter(|m| self.seen.insert(m.message_id))
            .map(format_line)
            .collect()
    }

    /// The error, only when it differs from the last one reported.
    pub fn error_change(&mut self, error: Option<&str>) -> Option<String> {
        if self.last_error.as_deref() == error {
            return None;
        }
        self.last_error = error.map(str::to_string);
        error.map(|e| format!("! {e}"))
    }
}

/// One-line report for a failed command. Transport failures say so, since
/// retrying may help; server refusals are shown as the server worded them.
pub fn describe_failure(error: &SyncError) -> String {
    if error.is_transport() {
        format!("! could not reach the server: {error}")
    } else {
        format!("! {error}")
    }
}

pub fn render_who(snapshot: &RoomSnapshot) -> Vec<String> {
    let room = snapshot
        .current_room_id
        .and_then(|id| snapshot.room_title(id))
        .unwrap_or("outside");
    let mut lines = vec![format!(
        "{} users online, you are in {room}{}",
        snapshot.user_count,
        if snapshot.is_cloaked { " (cloaked)" } else { "" }
    )];

    for group in &snapshot.rooms {
        if !group.title.is_empty() {
            lines.push(format!("{}:", group.title));
        }
        for user in &group.users {
            let you = if user.is_current_user { " (you)" } else { "" };
            lines.push(format!("  {}{you}", user.display_name));
        }
    }

    if let Some(suspension) = &snapshot.suspension {
        lines.push(suspension.describe(chrono::Utc::now()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatterbox_sync::chat::Author;
    use chatterbox_sync::presence::{AvailableRoom, RoomGroup, RoomUser};

    fn msg(id: u64, text: &str) -> ChatMessage {
        ChatMessage {
            message_id: id,
            msgtext: text.into(),
            author: Author {
                id: 1,
                title: "alice".into(),
            },
            timestamp: format!("not-a-time-{id}"),
        }
    }

    #[test]
    fn formats_classified_line() {
        assert_eq!(format_line(&msg(1, "/me waves")), "[not-a-time-1] alice waves");
        assert_eq!(format_line(&msg(2, "hi")), "[not-a-time-2] <alice> hi");
    }

    #[test]
    fn prints_each_message_once_oldest_first() {
        let mut printer = FeedPrinter::default();
        let mut feed = ChatFeed::from_snapshot(vec![msg(2, "b"), msg(1, "a")]);
        let lines = printer.new_lines(&feed);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("<alice> a"));

        feed.prepend(vec![msg(3, "c")]);
        let lines = printer.new_lines(&feed);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("<alice> c"));
        assert!(printer.new_lines(&feed).is_empty());
    }

    #[test]
    fn errors_reported_on_change_only() {
        let mut printer = FeedPrinter::default();
        assert_eq!(printer.error_change(None), None);
        assert_eq!(printer.error_change(Some("boom")), Some("! boom".into()));
        assert_eq!(printer.error_change(Some("boom")), None);
        assert_eq!(printer.error_change(None), None);
        assert_eq!(printer.error_change(Some("boom")), Some("! boom".into()));
    }

    #[test]
    fn failures_distinguish_transport_from_refusal() {
        assert_eq!(
            describe_failure(&SyncError::Network("timed out".into())),
            "! could not reach the server: network error: timed out"
        );
        assert_eq!(
            describe_failure(&SyncError::Rejected("You are borged".into())),
            "! You are borged"
        );
    }

    #[test]
    fn who_lists_users() {
        let snapshot = RoomSnapshot {
            user_count: 2,
            current_room_id: Some(5),
            available_rooms: vec![AvailableRoom {
                room_id: 5,
                title: "Den".into(),
            }],
            rooms: vec![RoomGroup {
                title: String::new(),
                users: vec![
                    RoomUser {
                        display_name: "alice".into(),
                        is_current_user: true,
                        ..RoomUser::default()
                    },
                    RoomUser {
                        display_name: "bob".into(),
                        ..RoomUser::default()
                    },
                ],
            }],
            ..RoomSnapshot::default()
        };
        assert_eq!(
            render_who(&snapshot),
            vec![
                "2 users online, you are in Den".to_string(),
                "  alice (you)".to_string(),
                "  bob".to_string(),
            ]
        );
    }
}
