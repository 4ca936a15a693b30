//! Merge strategies applied to successful fetch results.

use super::types::FetchMode;

/// Folds a fetched batch into the data currently held.
pub trait Merge<T, B>: Send + 'static {
    fn merge(&self, current: Option<T>, batch: B, mode: FetchMode) -> T;
}

/// Wholesale replacement. The batch is the new state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Replace;

impl<T> Merge<T, T> for Replace {
    fn merge(&self, _current: Option<T>, batch: T, _mode: FetchMode) -> T {
        batch
    }
}
