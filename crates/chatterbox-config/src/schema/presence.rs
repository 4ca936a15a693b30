//! Presence (other users / rooms) polling settings.

use serde::{Deserialize, Serialize};

/// Presence polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    pub interval_secs: u32,
    pub refresh_on_focus: bool,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            interval_secs: 120,
            refresh_on_focus: true,
        }
    }
}
