//! The fetch seam between a scheduler and its transport.

use std::future::Future;

use chatterbox_common::SyncError;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use super::types::FetchMode;

pub type FetchFuture<B> = BoxFuture<'static, Result<B, SyncError>>;

/// Produces one fetch. Anything the request needs from the current data
/// (a cursor, say) is read synchronously before the future is built.
pub trait Fetch<T>: Send + 'static {
    type Batch: Send + 'static;

    fn fetch(&self, mode: FetchMode, current: Option<&T>) -> FetchFuture<Self::Batch>;
}

/// Adapts a closure that only cares about the mode.
pub struct FnFetch<F>(pub F);

impl<T, B, F, Fut> Fetch<T> for FnFetch<F>
where
    F: Fn(FetchMode) -> Fut + Send + 'static,
    Fut: Future<Output = Result<B, SyncError>> + Send + 'static,
    B: Send + 'static,
{
    type Batch = B;

    fn fetch(&self, mode: FetchMode, _current: Option<&T>) -> FetchFuture<B> {
        (self.0)(mode).boxed()
    }
}
