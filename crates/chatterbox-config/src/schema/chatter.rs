//! Chat feed polling settings.

use serde::{Deserialize, Serialize};

/// Chatter feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatterConfig {
    /// Poll interval while the user was recently active.
    pub active_interval_secs: u32,
    /// Poll interval once the recent-activity window has lapsed.
    pub idle_interval_secs: u32,
    /// Number of messages requested by a snapshot fetch.
    pub snapshot_limit: u32,
    /// Room to scope the feed to. `None` leaves it to the server.
    pub room: Option<u64>,
    pub refresh_on_focus: bool,
}

impl Default for ChatterConfig {
    fn default() -> Self {
        Self {
            active_interval_secs: 45,
            idle_interval_secs: 120,
            snapshot_limit: 30,
            room: None,
            refresh_on_focus: true,
        }
    }
}
