//! Activity monitor: input recording plus the reconciliation tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chatterbox_common::TabId;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::leader::LeaderElection;

use super::tracker::ActivityTracker;
use super::types::{ActivitySignal, InputEvent, MonitorConfig};

struct Shared {
    tab: TabId,
    election: Arc<dyn LeaderElection>,
    tracker: Mutex<ActivityTracker>,
    signal_tx: watch::Sender<ActivitySignal>,
    closed: AtomicBool,
}

impl Shared {
    fn publish(&self, signal: ActivitySignal) {
        self.signal_tx.send_if_modified(|current| {
            if *current == signal {
                false
            } else {
                *current = signal;
                true
            }
        });
    }

    fn reconcile(&self) {
        let is_leader = self.election.is_leader(&self.tab);
        let signal = match self.tracker.lock() {
            Ok(mut tracker) => {
                if !tracker.reconcile(Instant::now(), is_leader) {
                    return;
                }
                tracker.signal()
            }
            Err(_) => {
                warn!(tab = %self.tab, "Activity tracker lock poisoned");
                return;
            }
        };
        debug!(
            tab = %self.tab,
            active = signal.is_active,
            recent = signal.is_recently_active,
            leader = signal.is_multi_tab_active,
            "Activity signal changed"
        );
        self.publish(signal);
    }
}

/// Watches user input and elapsed time for one tab.
///
/// Must be created inside a tokio runtime. Dropping the monitor tears it
/// down; subscribers then observe a closed channel and keep the last value.
pub struct ActivityMonitor {
    shared: Arc<Shared>,
    ticker: AbortHandle,
}

impl ActivityMonitor {
    /// Start observing with a fresh tab identity.
    pub fn observe(config: MonitorConfig, election: Arc<dyn LeaderElection>) -> Self {
        Self::observe_as(TabId::new(), config, election)
    }

    /// Start observing as an existing tab identity.
    pub fn observe_as(tab: TabId, config: MonitorConfig, election: Arc<dyn LeaderElection>) -> Self {
        let is_leader = election.is_leader(&tab);
        let tracker = ActivityTracker::new(config, Instant::now(), is_leader);
        let (signal_tx, _) = watch::channel(tracker.signal());

        let shared = Arc::new(Shared {
            tab,
            election,
            tracker: Mutex::new(tracker),
            signal_tx,
            closed: AtomicBool::new(false),
        });

        let period = config.reconcile_interval;
        let tick_shared = Arc::clone(&shared);
        let ticker = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick_shared.reconcile();
            }
        })
        .abort_handle();

        debug!(tab = %shared.tab, leader = is_leader, "Activity monitor started");
        Self { shared, ticker }
    }

    /// Feed one input event. Non-qualifying events are ignored.
    pub fn record(&self, event: InputEvent) {
        if !event.is_qualifying() || self.shared.closed.load(Ordering::Acquire) {
            return;
        }

        self.shared.election.claim_leadership(&self.shared.tab);

        let signal = match self.shared.tracker.lock() {
            Ok(mut tracker) => {
                tracker.on_input(Instant::now());
                tracker.signal()
            }
            Err(_) => {
                warn!(tab = %self.shared.tab, "Activity tracker lock poisoned");
                return;
            }
        };
        self.shared.publish(signal);
    }

    /// Current signal.
    pub fn signal(&self) -> ActivitySignal {
        *self.shared.signal_tx.borrow()
    }

    /// Receiver that sees every signal change. Pass it to a scheduler as its gate.
    pub fn subscribe(&self) -> watch::Receiver<ActivitySignal> {
        self.shared.signal_tx.subscribe()
    }

    pub fn tab(&self) -> &TabId {
        &self.shared.tab
    }

    pub fn is_running(&self) -> bool {
        !self.shared.closed.load(Ordering::Acquire)
    }

    /// Stop the tick and ignore further input. Safe to call repeatedly.
    pub fn shutdown(&self) {
        if self.shared.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.ticker.abort();
        debug!(tab = %self.shared.tab, "Activity monitor stopped");
    }
}

impl Drop for ActivityMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for ActivityMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityMonitor")
            .field("tab", &self.shared.tab)
            .field("signal", &self.signal())
            .field("running", &self.is_running())
            .finish()
    }
}
