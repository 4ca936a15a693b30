//! Interval policies.

use std::time::Duration;

use crate::activity::ActivitySignal;

/// Chooses the poll interval for the current activity signal.
pub trait IntervalPolicy: Send + 'static {
    fn interval(&self, signal: &ActivitySignal) -> Duration;
}

/// Same interval regardless of activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval(pub Duration);

impl IntervalPolicy for FixedInterval {
    fn interval(&self, _signal: &ActivitySignal) -> Duration {
        self.0
    }
}

/// Faster while the user was recently active, slower once that lapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoSpeed {
    pub active: Duration,
    pub idle: Duration,
}

impl TwoSpeed {
    pub fn from_secs(active: u64, idle: u64) -> Self {
        Self {
            active: Duration::from_secs(active),
            idle: Duration::from_secs(idle),
        }
    }
}

impl IntervalPolicy for TwoSpeed {
    fn interval(&self, signal: &ActivitySignal) -> Duration {
        if signal.is_recently_active {
            self.active
        } else {
            self.idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_speed_follows_recent_activity() {
        let policy = TwoSpeed::from_secs(45, 120);
        let mut signal = ActivitySignal::default();
        assert_eq!(policy.interval(&signal), Duration::from_secs(45));

        signal.is_recently_active = false;
        assert_eq!(policy.interval(&signal), Duration::from_secs(120));
    }

    #[test]
    fn fixed_ignores_signal() {
        let policy = FixedInterval(Duration::from_secs(120));
        let signal = ActivitySignal {
            is_active: false,
            is_recently_active: false,
            is_multi_tab_active: false,
        };
        assert_eq!(policy.interval(&signal), Duration::from_secs(120));
    }
}
