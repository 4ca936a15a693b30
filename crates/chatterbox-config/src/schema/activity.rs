//! Activity detection and leader election settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Activity monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    /// Minutes without input before polling is gated off.
    pub sleep_after_minutes: u32,
    /// Seconds without input before the "recently active" signal drops.
    pub recent_window_secs: u32,
    /// Seconds between reconciliation ticks.
    pub reconcile_interval_secs: u32,
    /// Shared leader-election file. Defaults to the platform data directory.
    pub store_path: Option<PathBuf>,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            sleep_after_minutes: 10,
            recent_window_secs: 60,
            reconcile_interval_secs: 5,
            store_path: None,
        }
    }
}
