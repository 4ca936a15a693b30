//! Caller-side handle to a running scheduler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chatterbox_common::SyncError;
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;
use tracing::debug;

use super::scheduler::Command;
use super::types::{FetchMode, PollState};

/// Handle returned by [`PollScheduler::spawn`](super::PollScheduler::spawn).
///
/// Dropping the handle tears the scheduler down.
pub struct PollHandle<T> {
    label: String,
    commands: mpsc::UnboundedSender<Command<T>>,
    state: watch::Receiver<PollState<T>>,
    mounted: Arc<AtomicBool>,
    task: AbortHandle,
}

impl<T> PollHandle<T> {
    pub(crate) fn new(
        label: String,
        commands: mpsc::UnboundedSender<Command<T>>,
        state: watch::Receiver<PollState<T>>,
        mounted: Arc<AtomicBool>,
        task: AbortHandle,
    ) -> Self {
        Self {
            label,
            commands,
            state,
            mounted,
            task,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Receiver that sees every state change.
    pub fn subscribe(&self) -> watch::Receiver<PollState<T>> {
        self.state.clone()
    }

    /// Run `f` against the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&PollState<T>) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Full snapshot fetch out of band, ignoring the gate. Supersedes any
    /// fetch already in flight.
    pub fn refresh(&self) -> Result<(), SyncError> {
        self.send(Command::Refresh(FetchMode::Snapshot))
    }

    /// Incremental fetch out of band, ignoring the gate.
    pub fn refresh_incremental(&self) -> Result<(), SyncError> {
        self.send(Command::Refresh(FetchMode::Incremental))
    }

    /// Replace the held data.
    pub fn set_data(&self, data: T) -> Result<(), SyncError> {
        self.send(Command::SetData(data))
    }

    /// Edit the held data in place on the scheduler task.
    pub fn update(&self, f: impl FnOnce(&mut Option<T>) + Send + 'static) -> Result<(), SyncError> {
        self.send(Command::Update(Box::new(f)))
    }

    pub fn is_running(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Cancel the timer and any in-flight fetch. Late results are discarded.
    /// Safe to call repeatedly.
    pub fn shutdown(&self) {
        if self.mounted.swap(false, Ordering::AcqRel) {
            self.task.abort();
            debug!(poller = %self.label, "Scheduler shut down");
        }
    }

    fn send(&self, command: Command<T>) -> Result<(), SyncError> {
        if !self.is_running() {
            return Err(SyncError::ShutDown);
        }
        self.commands.send(command).map_err(|_| SyncError::ShutDown)
    }
}

impl<T: Clone> PollHandle<T> {
    pub fn state(&self) -> PollState<T> {
        self.state.borrow().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.state.borrow().data.clone()
    }
}

impl<T> Drop for PollHandle<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<T> std::fmt::Debug for PollHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollHandle")
            .field("label", &self.label)
            .field("running", &self.is_running())
            .finish()
    }
}
