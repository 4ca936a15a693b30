//! Activity signal and input event types.

use std::time::Duration;

/// Three-valued activity signal published by the monitor.
///
/// Consumers only read it; the monitor is the sole writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySignal {
    /// Gate for whether polling may run at all.
    pub is_active: bool,
    /// Shorter-window signal for callers that want tighter UX.
    /// Never affects the poll gate on its own.
    pub is_recently_active: bool,
    /// True only for the leader tab.
    pub is_multi_tab_active: bool,
}

impl ActivitySignal {
    /// Whether a scheduler gated on this signal may arm its timer.
    pub fn polling_allowed(&self) -> bool {
        self.is_active && self.is_multi_tab_active
    }
}

impl Default for ActivitySignal {
    fn default() -> Self {
        Self {
            is_active: true,
            is_recently_active: true,
            is_multi_tab_active: true,
        }
    }
}

/// Low-level user input observed by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown,
    PointerMove,
    KeyDown,
    Scroll,
    TouchStart,
    Focus,
}

impl InputEvent {
    /// Only deliberate interaction counts as activity; hover and focus
    /// changes do not.
    pub fn is_qualifying(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerDown
                | InputEvent::KeyDown
                | InputEvent::Scroll
                | InputEvent::TouchStart
        )
    }
}

/// Timing knobs for [`ActivityMonitor`](super::ActivityMonitor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Inactivity after which `is_active` drops.
    pub sleep_after: Duration,
    /// Inactivity after which `is_recently_active` drops.
    pub recent_window: Duration,
    /// Period of the reconciliation tick.
    pub reconcile_interval: Duration,
}

impl MonitorConfig {
    pub fn with_sleep_after_minutes(minutes: u32) -> Self {
        Self {
            sleep_after: Duration::from_secs(u64::from(minutes) * 60),
            ..Self::default()
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sleep_after: Duration::from_secs(10 * 60),
            recent_window: Duration::from_secs(60),
            reconcile_interval: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifying_events() {
        assert!(InputEvent::PointerDown.is_qualifying());
        assert!(InputEvent::KeyDown.is_qualifying());
        assert!(InputEvent::Scroll.is_qualifying());
        assert!(InputEvent::TouchStart.is_qualifying());
        assert!(!InputEvent::PointerMove.is_qualifying());
        assert!(!InputEvent::Focus.is_qualifying());
    }

    #[test]
    fn polling_needs_activity_and_leadership() {
        let mut signal = ActivitySignal::default();
        assert!(signal.polling_allowed());

        signal.is_recently_active = false;
        assert!(signal.polling_allowed());

        signal.is_multi_tab_active = false;
        assert!(!signal.polling_allowed());

        signal.is_multi_tab_active = true;
        signal.is_active = false;
        assert!(!signal.polling_allowed());
    }

    #[test]
    fn sleep_after_minutes() {
        let config = MonitorConfig::with_sleep_after_minutes(3);
        assert_eq!(config.sleep_after, Duration::from_secs(180));
        assert_eq!(config.recent_window, Duration::from_secs(60));
        assert_eq!(config.reconcile_interval, Duration::from_secs(5));
    }
}
