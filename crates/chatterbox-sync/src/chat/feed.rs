//! In-memory chat feed with a monotonic cursor.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::poll::{FetchMode, Merge};

use super::message::ChatMessage;

/// Timestamp of the newest message seen, sent as `since` on the next
/// incremental fetch.
///
/// Compared by the instant it denotes; the server's text is kept verbatim
/// for the query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor {
    raw: String,
    at: DateTime<Utc>,
}

impl Cursor {
    /// `None` unless `timestamp` is RFC 3339.
    pub fn parse(timestamp: impl Into<String>) -> Option<Self> {
        let raw = timestamp.into();
        let at = DateTime::parse_from_rfc3339(&raw).ok()?.with_timezone(&Utc);
        Some(Self { raw, at })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Messages with unparseable timestamps never become the cursor.
fn newest_cursor(messages: &[ChatMessage]) -> Option<Cursor> {
    messages
        .iter()
        .filter_map(|m| Cursor::parse(m.timestamp.as_str()))
        .max_by_key(Cursor::at)
}

/// Messages newest-first, as the server delivers them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatFeed {
    messages: Vec<ChatMessage>,
    cursor: Option<Cursor>,
}

impl ChatFeed {
    pub fn from_snapshot(messages: Vec<ChatMessage>) -> Self {
        let cursor = newest_cursor(&messages);
        Self { messages, cursor }
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Newest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Display order.
    pub fn oldest_first(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().rev()
    }

    pub fn contains(&self, message_id: u64) -> bool {
        self.messages.iter().any(|m| m.message_id == message_id)
    }

    /// Put a newer batch in front. Messages already held are skipped.
    /// Returns how many were added.
    pub fn prepend(&mut self, batch: Vec<ChatMessage>) -> usize {
        if batch.is_empty() {
            return 0;
        }
        self.advance_cursor(newest_cursor(&batch));

        let known: HashSet<u64> = self.messages.iter().map(|m| m.message_id).collect();
        let mut fresh: Vec<ChatMessage> = Vec::with_capacity(batch.len());
        for msg in batch {
            if !known.contains(&msg.message_id)
                && !fresh.iter().any(|m| m.message_id == msg.message_id)
            {
                fresh.push(msg);
            }
        }

        let added = fresh.len();
        fresh.append(&mut self.messages);
        self.messages = fresh;
        added
    }

    /// Swap in a snapshot. The cursor never moves backward.
    pub fn replace(&mut self, snapshot: Vec<ChatMessage>) {
        let previous = self.cursor.take();
        *self = Self::from_snapshot(snapshot);
        self.advance_cursor(previous);
    }

    /// Drop every message, keeping the cursor.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Keep only the newest `max` messages.
    pub fn truncate(&mut self, max: usize) {
        self.messages.truncate(max);
    }

    fn advance_cursor(&mut self, candidate: Option<Cursor>) {
        let Some(candidate) = candidate else {
            return;
        };
        match &self.cursor {
            Some(current) if current.at() >= candidate.at() => {}
            _ => self.cursor = Some(candidate),
        }
    }
}

// ---------------------------------------------------------------------------
// Merge strategy
// ---------------------------------------------------------------------------

/// Snapshots replace the feed, incremental batches are prepended.
#[derive(Debug, Clone, Copy)]
pub struct ChatMerge {
    /// Oldest messages beyond this are dropped.
    pub max_messages: Option<usize>,
}

impl Default for ChatMerge {
    fn default() -> Self {
        Self {
            max_messages: Some(500),
        }
    }
}

impl Merge<ChatFeed, Vec<ChatMessage>> for ChatMerge {
    fn merge(&self, current: Option<ChatFeed>, batch: Vec<ChatMessage>, mode: FetchMode) -> ChatFeed {
        let mut feed = current.unwrap_or_default();
        match mode {
            FetchMode::Snapshot => feed.replace(batch),
            FetchMode::Incremental => {
                feed.prepend(batch);
            }
        }
        if let Some(max) = self.max_messages {
            feed.truncate(max);
        }
        feed
    }
}
