//! Generic adaptive-interval polling.
//!
//! A scheduler is parameterized by three injected pieces: a [`Fetch`], a
//! [`Merge`] strategy and an [`IntervalPolicy`]. The chat and presence
//! syncs are both built from it.

mod fetch;
mod handle;
mod merge;
mod policy;
mod scheduler;
mod types;

pub use fetch::{Fetch, FetchFuture, FnFetch};
pub use handle::PollHandle;
pub use merge::{Merge, Replace};
pub use policy::{FixedInterval, IntervalPolicy, TwoSpeed};
pub use scheduler::PollScheduler;
pub use types::{FetchMode, PollOptions, PollState, Visibility};
