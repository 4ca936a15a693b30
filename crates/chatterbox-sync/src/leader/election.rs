//! Leader election among tabs sharing one store.

use chatterbox_common::TabId;
use tracing::warn;

use super::store::SharedStore;

/// Storage key holding the identity of the most recently active tab.
pub const LEADER_KEY: &str = "lastActiveWindow";

/// Decides which tab is responsible for polling.
///
/// Call sites only claim and query; the reconciliation policy lives behind
/// this trait so it can be replaced without touching them.
pub trait LeaderElection: Send + Sync {
    /// Record `tab` as the most recent contender.
    fn claim_leadership(&self, tab: &TabId);

    /// Whether `tab` currently holds leadership.
    fn is_leader(&self, tab: &TabId) -> bool;
}

/// Last-writer-wins election over a single shared key.
///
/// An absent key means no contender yet, so every tab considers itself
/// leader until someone claims. Storage failures are treated the same way:
/// the worst outcome is duplicate polling.
#[derive(Debug, Clone)]
pub struct SharedKeyElection<S> {
    store: S,
    key: String,
}

impl<S: SharedStore> SharedKeyElection<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, LEADER_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: SharedStore> LeaderElection for SharedKeyElection<S> {
    fn claim_leadership(&self, tab: &TabId) {
        if let Err(e) = self.store.set(&self.key, tab.as_str()) {
            warn!(tab = %tab, error = %e, "Failed to claim leadership");
        }
    }

    fn is_leader(&self, tab: &TabId) -> bool {
        match self.store.get(&self.key) {
            Ok(None) => true,
            Ok(Some(current)) => current == tab.as_str(),
            Err(e) => {
                warn!(tab = %tab, error = %e, "Leader lookup failed, assuming leadership");
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leader::store::MemoryStore;
    use chatterbox_common::SyncError;

    #[test]
    fn absent_key_means_everyone_leads() {
        let election = SharedKeyElection::new(MemoryStore::new());
        assert!(election.is_leader(&TabId::new()));
        assert!(election.is_leader(&TabId::new()));
    }

    #[test]
    fn last_writer_wins() {
        let store = MemoryStore::new();
        let election = SharedKeyElection::new(store.clone());
        let a = TabId::new();
        let b = TabId::new();

        election.claim_leadership(&a);
        assert!(election.is_leader(&a));
        assert!(!election.is_leader(&b));

        election.claim_leadership(&b);
        assert!(!election.is_leader(&a));
        assert!(election.is_leader(&b));
        assert_eq!(
            store.get(LEADER_KEY).unwrap().as_deref(),
            Some(b.as_str())
        );
    }

    struct BrokenStore;

    impl SharedStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, SyncError> {
            Err(SyncError::Storage("disk on fire".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), SyncError> {
            Err(SyncError::Storage("disk on fire".into()))
        }
    }

    #[test]
    fn storage_failure_fails_open() {
        let election = SharedKeyElection::new(BrokenStore);
        let tab = TabId::new();
        election.claim_leadership(&tab);
        assert!(election.is_leader(&tab));
    }
}
