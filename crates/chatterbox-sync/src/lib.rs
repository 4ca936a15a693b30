//! Activity-aware polling engine for the chatter and presence views.
//!
//! An [`ActivityMonitor`](activity::ActivityMonitor) gates every
//! [`PollScheduler`](poll::PollScheduler); the chat and presence syncs are
//! schedulers with their own fetch and merge strategies. Chat lines are
//! classified for display by [`command::classify`].

pub mod activity;
pub mod api;
pub mod chat;
pub mod command;
pub mod leader;
pub mod poll;
pub mod presence;

#[cfg(test)]
pub(crate) mod test_support;

pub use activity::{ActivityMonitor, ActivitySignal, InputEvent, MonitorConfig};
pub use api::{ChatterTransport, HttpTransport, HttpTransportConfig};
pub use chat::{ChatFeed, ChatFeedSync, ChatMessage, ChatSyncConfig};
pub use command::{classify, CommandVariant};
pub use leader::{FileStore, LeaderElection, MemoryStore, SharedKeyElection, SharedStore};
pub use poll::{PollHandle, PollOptions, PollScheduler, PollState, Visibility};
pub use presence::{PresenceSync, RoomSnapshot};
