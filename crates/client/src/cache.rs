//! Cache persistence
//!
//! Opaque key/value store for the client's response-cache snapshots. One
//! JSON file maps cache keys to snapshots; writes are atomic (temp file +
//! rename) and serialized by a mutex so a crash mid-write cannot corrupt
//! the file. Which key a client uses comes from its configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// File-backed snapshot store.
///
/// The mutex serializes all writes. Reads acquire the lock briefly to
/// clone the requested entry, so they don't block on in-flight writes
/// longer than necessary.
pub struct CacheStore {
    path: PathBuf,
    state: Mutex<HashMap<String, serde_json::Value>>,
}

impl CacheStore {
    /// Load the store from the given file path.
    ///
    /// If the file doesn't exist it is created as `{}`, so later loads
    /// skip the cold-start path.
    pub async fn load(path: PathBuf) -> Result<Self> {
        let state = if path.exists() {
            let contents = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| Error::Io(format!("reading cache file: {e}")))?;
            let snapshots: HashMap<String, serde_json::Value> = serde_json::from_str(&contents)
                .map_err(|e| Error::Parse(format!("parsing cache file: {e}")))?;
            info!(path = %path.display(), entries = snapshots.len(), "loaded cache snapshots");
            snapshots
        } else {
            info!(path = %path.display(), "cache file not found, starting empty");
            let snapshots = HashMap::new();
            write_atomic(&path, &snapshots).await?;
            snapshots
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Get a clone of the snapshot stored under `key`.
    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let state = self.state.lock().await;
        state.get(key).cloned()
    }

    /// Store or replace a snapshot and persist to disk.
    pub async fn put(&self, key: String, snapshot: serde_json::Value) -> Result<()> {
        let mut state = self.state.lock().await;
        state.insert(key.clone(), snapshot);
        debug!(key, "stored cache snapshot");
        write_atomic(&self.path, &state).await
    }

    /// Remove a snapshot and persist to disk.
    ///
    /// Returns the removed snapshot if it existed.
    pub async fn remove(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let mut state = self.state.lock().await;
        let removed = state.remove(key);
        if removed.is_some() {
            debug!(key, "removed cache snapshot");
            write_atomic(&self.path, &state).await?;
        }
        Ok(removed)
    }

    /// Number of stored snapshots.
    pub async fn len(&self) -> usize {
        let state = self.state.lock().await;
        state.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Write snapshots to the file atomically.
///
/// Writes a temporary file in the same directory, then renames it over the
/// target. Permissions are 0600 since cached responses can contain
/// user data.
async fn write_atomic(path: &Path, data: &HashMap<String, serde_json::Value>) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| Error::Parse(format!("serializing cache: {e}")))?;

    let dir = path
        .parent()
        .ok_or_else(|| Error::Io("cache path has no parent directory".into()))?;

    let tmp_path = dir.join(format!(".cache.tmp.{}", std::process::id()));

    tokio::fs::write(&tmp_path, json.as_bytes())
        .await
        .map_err(|e| Error::Io(format!("writing temp cache file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        tokio::fs::set_permissions(&tmp_path, perms)
            .await
            .map_err(|e| Error::Io(format!("setting cache file permissions: {e}")))?;
    }

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Error::Io(format!("renaming temp cache file: {e}")))?;

    debug!(path = %path.display(), "persisted cache snapshots");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn roundtrip_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let store = CacheStore::load(path.clone()).await.unwrap();
        store
            .put(
                "mobile-cache".into(),
                serde_json::json!({"Query": {"viewer": {"id": "u1"}}}),
            )
            .await
            .unwrap();

        let store2 = CacheStore::load(path).await.unwrap();
        let snapshot = store2.get("mobile-cache").await.unwrap();
        assert_eq!(snapshot["Query"]["viewer"]["id"], "u1");
    }

    #[tokio::test]
    async fn cold_start_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        assert!(!path.exists());
        let store = CacheStore::load(path.clone()).await.unwrap();
        assert!(store.is_empty().await);
        assert!(path.exists());

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let parsed: HashMap<String, serde_json::Value> =
            serde_json::from_str(&contents).unwrap();
        assert!(parsed.is_empty());
    }

    #[tokio::test]
    async fn remove_returns_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let store = CacheStore::load(path).await.unwrap();
        store
            .put("k".into(), serde_json::json!({"n": 1}))
            .await
            .unwrap();

        let removed = store.remove("k").await.unwrap();
        assert_eq!(removed.unwrap()["n"], 1);
        assert!(store.remove("k").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_permissions_are_0600() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let store = CacheStore::load(path.clone()).await.unwrap();
        store
            .put("k".into(), serde_json::json!({"n": 1}))
            .await
            .unwrap();

        let metadata = tokio::fs::metadata(&path).await.unwrap();
        let mode = metadata.permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "cache file must be 0600, got {mode:o}");
    }

    #[tokio::test]
    async fn concurrent_writes_keep_file_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let store = std::sync::Arc::new(CacheStore::load(path.clone()).await.unwrap());

        let mut handles = vec![];
        for i in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .put(format!("key-{i}"), serde_json::json!({"n": i}))
                    .await
                    .unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        assert_eq!(store.len().await, 10);
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let parsed: HashMap<String, serde_json::Value> =
            serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.len(), 10);
    }

    #[tokio::test]
    async fn load_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        tokio::fs::write(&path, "{ truncated").await.unwrap();

        let result = CacheStore::load(path).await;
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
