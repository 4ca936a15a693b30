//! Chat feed synchronization.
//!
//! Snapshots replace the feed; every later poll asks only for messages
//! after the cursor and prepends them.

mod feed;
mod fetch;
mod message;
mod sync;

pub use feed::{ChatFeed, ChatMerge, Cursor};
pub use message::{Author, ChatMessage};
pub use sync::{ChatFeedSync, ChatSyncConfig};
