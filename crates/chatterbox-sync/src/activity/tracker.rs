//! Clock-driven activity state, free of I/O.

use tokio::time::Instant;

use super::types::{ActivitySignal, MonitorConfig};

/// Pure state machine behind the monitor. Every method takes `now` so it
/// can be driven by tests without a runtime.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    config: MonitorConfig,
    last_activity: Instant,
    signal: ActivitySignal,
}

impl ActivityTracker {
    /// Start out active, as if the user had just interacted.
    pub fn new(config: MonitorConfig, now: Instant, is_leader: bool) -> Self {
        Self {
            config,
            last_activity: now,
            signal: ActivitySignal {
                is_multi_tab_active: is_leader,
                ..ActivitySignal::default()
            },
        }
    }

    pub fn signal(&self) -> ActivitySignal {
        self.signal
    }

    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    /// A qualifying input arrived. Returns whether the signal changed.
    pub fn on_input(&mut self, now: Instant) -> bool {
        let before = self.signal;
        self.last_activity = now;
        self.signal.is_active = true;
        self.signal.is_recently_active = true;
        self.signal != before
    }

    /// Reconciliation tick. Returns whether the signal changed.
    pub fn reconcile(&mut self, now: Instant, is_leader: bool) -> bool {
        let before = self.signal;
        let idle = now.saturating_duration_since(self.last_activity);

        if idle >= self.config.sleep_after {
            self.signal.is_active = false;
        }
        if idle >= self.config.recent_window {
            self.signal.is_recently_active = false;
        }
        self.signal.is_multi_tab_active = is_leader;

        self.signal != before
    }
}
