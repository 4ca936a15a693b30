//! Chat message as delivered by the chatter endpoint.

use serde::{Deserialize, Serialize};

/// A single chatter line. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Server-assigned, monotonic per room.
    pub message_id: u64,
    pub msgtext: String,
    #[serde(alias = "author_user")]
    pub author: Author,
    /// ISO-8601, as sent by the server.
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(alias = "node_id")]
    pub id: u64,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_server_shape() {
        let json = r#"{
            "message_id": 991,
            "msgtext": "/me waves",
            "author_user": { "node_id": 12, "title": "alice", "type": "user" },
            "timestamp": "2025-03-04T10:11:12Z"
        }"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.message_id, 991);
        assert_eq!(msg.author.id, 12);
        assert_eq!(msg.author.title, "alice");
    }

    #[test]
    fn deserializes_canonical_shape() {
        let json = r#"{
            "message_id": 1,
            "msgtext": "hi",
            "author": { "id": 3, "title": "bob" },
            "timestamp": "2025-03-04T10:11:12Z"
        }"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.author.title, "bob");
    }
}
