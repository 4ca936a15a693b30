//! The scheduler actor.
//!
//! One task per scheduler owns the timer, the single in-flight fetch and
//! every state write. Gate, visibility and region changes arrive over
//! watch channels; caller requests arrive over the command channel.

use std::future::pending;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chatterbox_common::SyncError;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use crate::activity::ActivitySignal;

use super::fetch::{Fetch, FetchFuture};
use super::handle::PollHandle;
use super::merge::Merge;
use super::policy::IntervalPolicy;
use super::types::{FetchMode, PollOptions, PollState, Visibility};

pub(crate) type Updater<T> = Box<dyn FnOnce(&mut Option<T>) + Send>;

pub(crate) enum Command<T> {
    Refresh(FetchMode),
    SetData(T),
    Update(Updater<T>),
}

/// Entry point for spawning schedulers.
pub struct PollScheduler;

impl PollScheduler {
    /// Spawn a scheduler task. Must be called inside a tokio runtime.
    ///
    /// Fetches immediately unless `options.initial_data` is set, then polls
    /// at `policy`'s interval whenever `gate` allows it.
    pub fn spawn<T, F, M, P>(
        fetch: F,
        merge: M,
        policy: P,
        gate: watch::Receiver<ActivitySignal>,
        options: PollOptions<T>,
    ) -> PollHandle<T>
    where
        T: Send + Sync + 'static,
        F: Fetch<T>,
        M: Merge<T, F::Batch>,
        P: IntervalPolicy,
    {
        let PollOptions {
            label,
            initial_data,
            refresh_on_focus,
            visibility,
            region_open,
        } = options;

        let seeded = initial_data.is_some();
        let (state_tx, state_rx) = watch::channel(PollState::starting(initial_data));
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let mounted = Arc::new(AtomicBool::new(true));

        let mut gate = gate;
        let signal = *gate.borrow_and_update();
        let mut visibility = visibility;
        let visible = visibility
            .as_mut()
            .map(|rx| *rx.borrow_and_update())
            .unwrap_or_default();
        let mut region_open = region_open;
        let region_is_open = region_open
            .as_mut()
            .map(|rx| *rx.borrow_and_update())
            .unwrap_or(true);

        let actor = Actor {
            label: label.clone(),
            fetch,
            merge,
            policy,
            state_tx,
            mounted: Arc::clone(&mounted),
            gate: Some(gate),
            signal,
            visibility,
            visible,
            region: region_open,
            region_is_open,
            missed_update: false,
            refresh_on_focus,
            in_flight: None,
            deadline: None,
            armed_with: None,
        };

        let task = tokio::spawn(actor.run(command_rx, seeded)).abort_handle();
        PollHandle::new(label, command_tx, state_rx, mounted, task)
    }
}

struct Actor<T, F: Fetch<T>, M, P> {
    label: String,
    fetch: F,
    merge: M,
    policy: P,
    state_tx: watch::Sender<PollState<T>>,
    mounted: Arc<AtomicBool>,

    gate: Option<watch::Receiver<ActivitySignal>>,
    signal: ActivitySignal,
    visibility: Option<watch::Receiver<Visibility>>,
    visible: Visibility,
    region: Option<watch::Receiver<bool>>,
    region_is_open: bool,
    missed_update: bool,
    refresh_on_focus: bool,

    in_flight: Option<(FetchMode, FetchFuture<F::Batch>)>,
    deadline: Option<Instant>,
    /// Interval the pending deadline was armed with.
    armed_with: Option<Duration>,
}

impl<T, F, M, P> Actor<T, F, M, P>
where
    T: Send + Sync + 'static,
    F: Fetch<T>,
    M: Merge<T, F::Batch>,
    P: IntervalPolicy,
{
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command<T>>, seeded: bool) {
        debug!(poller = %self.label, seeded, "Scheduler started");
        if seeded {
            self.sync_timer(true);
        } else {
            self.dispatch(FetchMode::Snapshot);
        }

        loop {
            tokio::select! {
                (mode, result) = poll_in_flight(&mut self.in_flight) => {
                    self.in_flight = None;
                    self.commit(mode, result);
                    self.sync_timer(true);
                }
                _ = sleep_until(self.deadline) => {
                    debug!(poller = %self.label, "Poll timer fired");
                    self.dispatch(FetchMode::Incremental);
                }
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                alive = changed(&mut self.gate) => {
                    if alive {
                        self.on_gate_change();
                    } else {
                        self.gate = None;
                    }
                }
                alive = changed(&mut self.visibility) => {
                    if alive {
                        self.on_visibility_change();
                    } else {
                        self.visibility = None;
                    }
                }
                alive = changed(&mut self.region) => {
                    if alive {
                        self.on_region_change();
                    } else {
                        self.region = None;
                    }
                }
            }
        }

        debug!(poller = %self.label, "Scheduler stopped");
    }

    // -- timer ---------------------------------------------------------------

    /// The interval the timer should run at right now, if any.
    fn desired_interval(&self) -> Option<Duration> {
        let eligible =
            self.signal.polling_allowed() && self.region_is_open && self.in_flight.is_none();
        eligible.then(|| self.policy.interval(&self.signal))
    }

    /// Bring the deadline in line with the current conditions.
    ///
    /// With `restart` the timer is re-armed from zero even if it was
    /// already running at the desired interval.
    fn sync_timer(&mut self, restart: bool) {
        if !self.region_is_open && self.signal.polling_allowed() && self.in_flight.is_none() {
            self.missed_update = true;
        }

        match self.desired_interval() {
            None => {
                if self.deadline.is_some() {
                    debug!(poller = %self.label, "Poll timer cancelled");
                }
                self.deadline = None;
                self.armed_with = None;
            }
            Some(interval) => {
                if restart || self.armed_with != Some(interval) || self.deadline.is_none() {
                    self.deadline = Some(Instant::now() + interval);
                    self.armed_with = Some(interval);
                }
            }
        }
    }

    // -- fetch ---------------------------------------------------------------

    /// Start a fetch, dropping any fetch already in flight.
    fn dispatch(&mut self, mode: FetchMode) {
        if self.in_flight.is_some() {
            debug!(poller = %self.label, ?mode, "Superseding in-flight fetch");
        }
        let future = {
            let state = self.state_tx.borrow();
            self.fetch.fetch(mode, state.data.as_ref())
        };
        self.in_flight = Some((mode, future));
        self.deadline = None;
        self.armed_with = None;

        self.state_tx.send_if_modified(|state| {
            if state.loading {
                false
            } else {
                state.loading = true;
                true
            }
        });
    }

    fn commit(&mut self, mode: FetchMode, result: Result<F::Batch, SyncError>) {
        if !self.mounted.load(Ordering::Acquire) {
            return;
        }
        match result {
            Ok(batch) => {
                let merge = &self.merge;
                self.state_tx.send_modify(|state| {
                    let current = state.data.take();
                    state.data = Some(merge.merge(current, batch, mode));
                    state.loading = false;
                    state.error = None;
                });
            }
            Err(e) => {
                warn!(poller = %self.label, ?mode, error = %e, "Poll fetch failed");
                self.state_tx.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(e.to_string());
                });
            }
        }
    }

    // -- inputs --------------------------------------------------------------

    fn handle(&mut self, command: Command<T>) {
        match command {
            Command::Refresh(mode) => self.dispatch(mode),
            Command::SetData(data) => {
                if self.mounted.load(Ordering::Acquire) {
                    self.state_tx.send_modify(|state| state.data = Some(data));
                }
            }
            Command::Update(update) => {
                if self.mounted.load(Ordering::Acquire) {
                    self.state_tx.send_modify(|state| update(&mut state.data));
                }
            }
        }
    }

    fn on_gate_change(&mut self) {
        let Some(gate) = self.gate.as_mut() else {
            return;
        };
        self.signal = *gate.borrow_and_update();
        debug!(
            poller = %self.label,
            active = self.signal.is_active,
            leader = self.signal.is_multi_tab_active,
            "Gate changed"
        );
        self.sync_timer(false);
    }

    fn on_visibility_change(&mut self) {
        let Some(visibility) = self.visibility.as_mut() else {
            return;
        };
        let previous = self.visible;
        self.visible = *visibility.borrow_and_update();

        let became_visible = previous == Visibility::Hidden && self.visible == Visibility::Visible;
        if became_visible && self.refresh_on_focus && self.signal.is_active {
            debug!(poller = %self.label, "Page visible, refreshing");
            self.dispatch(FetchMode::Incremental);
        }
    }

    fn on_region_change(&mut self) {
        let Some(region) = self.region.as_mut() else {
            return;
        };
        let was_open = self.region_is_open;
        self.region_is_open = *region.borrow_and_update();

        if self.region_is_open && !was_open && self.missed_update {
            self.missed_update = false;
            debug!(poller = %self.label, "Region expanded, catching up");
            self.dispatch(FetchMode::Incremental);
        }
        self.sync_timer(false);
    }
}

// ---------------------------------------------------------------------------
// select! helpers
// ---------------------------------------------------------------------------

/// Resolves when the in-flight fetch does; pends forever when there is none.
/// Cancel-safe: the fetch stays in the slot if another branch wins.
async fn poll_in_flight<B>(
    slot: &mut Option<(FetchMode, FetchFuture<B>)>,
) -> (FetchMode, Result<B, SyncError>) {
    match slot {
        Some((mode, future)) => {
            let mode = *mode;
            (mode, future.await)
        }
        None => pending().await,
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => pending().await,
    }
}

/// `true` on a change, `false` once the sender is gone.
async fn changed<V>(rx: &mut Option<watch::Receiver<V>>) -> bool {
    match rx {
        Some(rx) => rx.changed().await.is_ok(),
        None => pending().await,
    }
}
