//! HTTP collaborator settings.

use serde::{Deserialize, Serialize};

/// Where the chatter and chatroom endpoints live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Site origin, e.g. `https://everything2.com`. Endpoint paths are appended.
    pub base_url: String,
    /// Whole-request timeout in seconds (valid range: 1-120).
    pub request_timeout_secs: u32,
    /// TCP/TLS connect timeout in seconds (valid range: 1-60).
    pub connect_timeout_secs: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://everything2.com".into(),
            request_timeout_secs: 25,
            connect_timeout_secs: 10,
        }
    }
}
