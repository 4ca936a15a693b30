//! Scheduler state and options.

use tokio::sync::watch;

/// Observable state of one scheduler.
///
/// `data` survives failed fetches; `error` is cleared by the next success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState<T> {
    pub data: Option<T>,
    /// A fetch is in flight.
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> PollState<T> {
    pub(crate) fn starting(initial_data: Option<T>) -> Self {
        Self {
            loading: initial_data.is_none(),
            data: initial_data,
            error: None,
        }
    }
}

impl<T> Default for PollState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// What a fetch is asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Full current state, replacing whatever is held.
    Snapshot,
    /// Only what changed since the data currently held.
    Incremental,
}

/// Page visibility as reported by the embedding UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// Per-scheduler options.
pub struct PollOptions<T> {
    /// Name used in log lines.
    pub label: String,
    /// Seed data. When present no fetch is made on start.
    pub initial_data: Option<T>,
    /// Fire one refresh when the page becomes visible while active.
    pub refresh_on_focus: bool,
    pub visibility: Option<watch::Receiver<Visibility>>,
    /// Whether the containing UI region is expanded. A collapsed region
    /// suppresses polling and schedules one catch-up fetch on re-expand.
    pub region_open: Option<watch::Receiver<bool>>,
}

impl<T> PollOptions<T> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            initial_data: None,
            refresh_on_focus: true,
            visibility: None,
            region_open: None,
        }
    }

    pub fn with_initial_data(mut self, data: Option<T>) -> Self {
        self.initial_data = data;
        self
    }

    pub fn refresh_on_focus(mut self, enabled: bool) -> Self {
        self.refresh_on_focus = enabled;
        self
    }

    pub fn with_visibility(mut self, visibility: watch::Receiver<Visibility>) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_region(mut self, region_open: watch::Receiver<bool>) -> Self {
        self.region_open = Some(region_open);
        self
    }
}

impl<T> std::fmt::Debug for PollOptions<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollOptions")
            .field("label", &self.label)
            .field("initial_data", &self.initial_data.is_some())
            .field("refresh_on_focus", &self.refresh_on_focus)
            .field("visibility", &self.visibility.is_some())
            .field("region_open", &self.region_open.is_some())
            .finish()
    }
}
