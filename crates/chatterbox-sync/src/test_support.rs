//! Scripted transport shared by the sync tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chatterbox_common::SyncError;

use crate::api::{ChatterQuery, ChatterTransport, PostOutcome, RoomActionResponse};
use crate::chat::{Author, ChatMessage};
use crate::presence::RoomSnapshot;

pub(crate) fn msg(id: u64, secs: u32, text: &str) -> ChatMessage {
    ChatMessage {
        message_id: id,
        msgtext: text.to_string(),
        author: Author {
            id: 7,
            title: "alice".into(),
        },
        timestamp: format!("2025-01-01T00:{:02}:{:02}Z", secs / 60, secs % 60),
    }
}

/// Responses are consumed in order; an empty script answers with an
/// empty batch / default snapshot.
#[derive(Default)]
pub(crate) struct MockTransport {
    pub chatter: Mutex<VecDeque<Result<Vec<ChatMessage>, SyncError>>>,
    pub chatter_latency: Mutex<Duration>,
    pub queries: Mutex<Vec<ChatterQuery>>,
    pub posts: Mutex<Vec<String>>,
    pub post_result: Mutex<Option<Result<PostOutcome, SyncError>>>,
    pub cleared: AtomicUsize,
    pub rooms: Mutex<VecDeque<Result<RoomSnapshot, SyncError>>>,
    pub room_fetches: AtomicUsize,
    pub actions: Mutex<Vec<String>>,
    pub action_result: Mutex<Option<Result<RoomActionResponse, SyncError>>>,
}

impl MockTransport {
    pub fn push_chatter(&self, result: Result<Vec<ChatMessage>, SyncError>) {
        self.chatter.lock().unwrap().push_back(result);
    }

    pub fn push_room(&self, result: Result<RoomSnapshot, SyncError>) {
        self.rooms.lock().unwrap().push_back(result);
    }

    pub fn queries(&self) -> Vec<ChatterQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn room_fetches(&self) -> usize {
        self.room_fetches.load(Ordering::SeqCst)
    }

    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().unwrap().clone()
    }

    pub fn set_action_result(&self, result: Result<RoomActionResponse, SyncError>) {
        *self.action_result.lock().unwrap() = Some(result);
    }

    fn action(&self, name: String) -> Result<RoomActionResponse, SyncError> {
        self.actions.lock().unwrap().push(name);
        self.action_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(RoomActionResponse::default()))
    }
}

#[async_trait]
impl ChatterTransport for MockTransport {
    async fn fetch_chatter(&self, query: &ChatterQuery) -> Result<Vec<ChatMessage>, SyncError> {
        self.queries.lock().unwrap().push(query.clone());
        let latency = *self.chatter_latency.lock().unwrap();
        let next = self.chatter.lock().unwrap().pop_front();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn post_message(&self, message: &str) -> Result<PostOutcome, SyncError> {
        self.posts.lock().unwrap().push(message.to_string());
        self.post_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(PostOutcome::default()))
    }

    async fn clear_all(&self) -> Result<(), SyncError> {
        self.cleared.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_room(&self) -> Result<RoomSnapshot, SyncError> {
        self.room_fetches.fetch_add(1, Ordering::SeqCst);
        let next = self.rooms.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(RoomSnapshot::default()))
    }

    async fn change_room(&self, room_id: u64) -> Result<RoomActionResponse, SyncError> {
        self.action(format!("change_room:{room_id}"))
    }

    async fn set_cloaked(&self, cloaked: bool) -> Result<RoomActionResponse, SyncError> {
        self.action(format!("set_cloaked:{cloaked}"))
    }

    async fn create_room(&self, title: &str, doctext: &str) -> Result<RoomActionResponse, SyncError> {
        self.action(format!("create_room:{title}:{doctext}"))
    }
}

pub(crate) async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
