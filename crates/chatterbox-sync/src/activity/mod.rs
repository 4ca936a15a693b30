//! User activity detection.
//!
//! The monitor turns raw input events and elapsed time into an
//! [`ActivitySignal`] that gates every poller in the process.

mod monitor;
mod tracker;
mod types;

pub use monitor::ActivityMonitor;
pub use tracker::ActivityTracker;
pub use types::{ActivitySignal, InputEvent, MonitorConfig};
