//! Chat fetch: snapshot or cursor-based increment, scoped to a room.

use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::watch;

use crate::api::{ChatterQuery, ChatterTransport};
use crate::poll::{Fetch, FetchFuture, FetchMode};

use super::feed::ChatFeed;
use super::message::ChatMessage;

pub(crate) struct ChatFetch {
    pub transport: Arc<dyn ChatterTransport>,
    pub limit: u32,
    pub room: watch::Receiver<Option<u64>>,
}

impl ChatFetch {
    /// Incremental fetches need a cursor; without one they degrade to a
    /// snapshot request.
    pub(crate) fn query(&self, mode: FetchMode, current: Option<&ChatFeed>) -> ChatterQuery {
        let room = *self.room.borrow();
        match (mode, current.and_then(ChatFeed::cursor)) {
            (FetchMode::Incremental, Some(cursor)) => ChatterQuery::Since {
                since: cursor.clone(),
                room,
            },
            _ => ChatterQuery::Latest {
                limit: self.limit,
                room,
            },
        }
    }
}

impl Fetch<ChatFeed> for ChatFetch {
    type Batch = Vec<ChatMessage>;

    fn fetch(&self, mode: FetchMode, current: Option<&ChatFeed>) -> FetchFuture<Vec<ChatMessage>> {
        let query = self.query(mode, current);
        let transport = Arc::clone(&self.transport);
        async move { transport.fetch_chatter(&query).await }.boxed()
    }
}
