//! Origin-scoped key/value stores shared by every tab of one client.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chatterbox_common::SyncError;

/// A tiny persistent key/value store visible to all tabs.
///
/// No locking protocol: concurrent writers race and the last write wins.
pub trait SharedStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SyncError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SyncError>;
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// In-process store. Clones share the same map, so several monitors in one
/// process behave like tabs of one browser profile.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SharedStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SyncError> {
        let map = self
            .inner
            .lock()
            .map_err(|_| SyncError::Storage("memory store lock poisoned".into()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SyncError> {
        let mut map = self
            .inner
            .lock()
            .map_err(|_| SyncError::Storage("memory store lock poisoned".into()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed
// ---------------------------------------------------------------------------

/// JSON file store shared by every client process of one user on one machine.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/chatterbox/tabs.json`.
    pub fn default_path() -> Result<PathBuf, SyncError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| SyncError::Storage("could not determine data directory".into()))?;
        Ok(data_dir.join("chatterbox").join("tabs.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>, SyncError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                SyncError::Storage(format!("corrupt store {}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(SyncError::Storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }
}

impl SharedStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SyncError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SyncError> {
        // A corrupt file is replaced rather than blocking every future claim.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SyncError::Storage(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string(&map)
            .map_err(|e| SyncError::Storage(format!("failed to encode store: {e}")))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .map_err(|e| SyncError::Storage(format!("failed to write {}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            SyncError::Storage(format!("failed to replace {}: {e}", self.path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_clones_share_state() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("k", "v1").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v1"));
        b.set("k", "v2").unwrap();
        assert_eq!(a.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn memory_store_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("absent").unwrap(), None);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("tabs.json"));
        assert_eq!(store.get("lastActiveWindow").unwrap(), None);

        store.set("lastActiveWindow", "tab-a").unwrap();
        store.set("other", "x").unwrap();
        assert_eq!(
            store.get("lastActiveWindow").unwrap().as_deref(),
            Some("tab-a")
        );

        let reopened = FileStore::new(store.path());
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn file_store_corrupt_file_reports_then_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabs.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("k"), Err(SyncError::Storage(_))));

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
