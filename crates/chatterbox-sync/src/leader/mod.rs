//! Cross-tab leader election.
//!
//! Every tab writes its identity into one shared key when the user
//! interacts with it; the tab whose identity is stored is the leader and
//! the only one that polls. Eventually consistent, no locks.

mod election;
mod store;

pub use election::{LeaderElection, SharedKeyElection, LEADER_KEY};
pub use store::{FileStore, MemoryStore, SharedStore};
