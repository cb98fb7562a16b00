//! File-based Link Store Adapter
//!
//! Persists account links as a single JSON document on disk. Suited to
//! the scale of one community server; every record is rewritten on each
//! change, which keeps the file human-readable for debugging.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::player::FaceitProfile;
use crate::ports::{LinkStore, LinkStoreError};

/// One persisted account link.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinkRecord {
    profile: FaceitProfile,
    linked_at: Timestamp,
}

/// File-backed storage for account links.
#[derive(Debug, Clone)]
pub struct FileLinkStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the shared file.
    guard: Arc<Mutex<()>>,
}

impl FileLinkStore {
    /// Create a new file store backed by the given JSON file
    ///
    /// # Arguments
    /// * `path` - Location of the link file; created on first write
    ///
    /// # Example
    /// ```ignore
    /// let store = FileLinkStore::new("./data/links.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            guard: Arc::new(Mutex::new(())),
        }
    }

    /// Load all records; a missing file reads as an empty store.
    async fn read_records(&self) -> Result<HashMap<String, LinkRecord>, LinkStoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let json = fs::read_to_string(&self.path)
            .await
            .map_err(|e| LinkStoreError::io(e.to_string()))?;

        serde_json::from_str(&json).map_err(|e| LinkStoreError::serialization(e.to_string()))
    }

    /// Write all records back out, creating the parent directory if needed.
    async fn write_records(
        &self,
        records: &HashMap<String, LinkRecord>,
    ) -> Result<(), LinkStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| LinkStoreError::io(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| LinkStoreError::serialization(e.to_string()))?;

        fs::write(&self.path, json)
            .await
            .map_err(|e| LinkStoreError::io(e.to_string()))
    }
}

#[async_trait]
impl LinkStore for FileLinkStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<FaceitProfile>, LinkStoreError> {
        let _held = self.guard.lock().await;

        let records = self.read_records().await?;
        Ok(records.get(user_id.as_str()).map(|r| r.profile.clone()))
    }

    async fn put(&self, user_id: &UserId, profile: &FaceitProfile) -> Result<(), LinkStoreError> {
        let _held = self.guard.lock().await;

        let mut records = self.read_records().await?;
        records.insert(
            user_id.as_str().to_string(),
            LinkRecord {
                profile: profile.clone(),
                linked_at: Timestamp::now(),
            },
        );
        self.write_records(&records).await
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool, LinkStoreError> {
        let _held = self.guard.lock().await;

        let mut records = self.read_records().await?;
        let existed = records.remove(user_id.as_str()).is_some();
        if existed {
            self.write_records(&records).await?;
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Elo;
    use tempfile::TempDir;

    fn test_user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn test_profile(nickname: &str, elo: u32) -> FaceitProfile {
        FaceitProfile::new(format!("pid-{nickname}"), nickname, Some(Elo::new(elo))).unwrap()
    }

    #[tokio::test]
    async fn test_file_store_put_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLinkStore::new(temp_dir.path().join("links.json"));

        let user = test_user("u1");
        let profile = test_profile("s1mple", 3800);

        store.put(&user, &profile).await.unwrap();

        let loaded = store.get(&user).await.unwrap();
        assert_eq!(loaded, Some(profile));
    }

    #[tokio::test]
    async fn test_file_store_get_unknown_user() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLinkStore::new(temp_dir.path().join("links.json"));

        let loaded = store.get(&test_user("nobody")).await.unwrap();
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn test_file_store_put_replaces_existing_link() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLinkStore::new(temp_dir.path().join("links.json"));

        let user = test_user("u1");
        store.put(&user, &test_profile("old-nick", 1500)).await.unwrap();
        store.put(&user, &test_profile("new-nick", 2100)).await.unwrap();

        let loaded = store.get(&user).await.unwrap().unwrap();
        assert_eq!(loaded.nickname(), "new-nick");
        assert_eq!(loaded.elo(), Some(Elo::new(2100)));
    }

    #[tokio::test]
    async fn test_file_store_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLinkStore::new(temp_dir.path().join("links.json"));

        let user = test_user("u1");
        store.put(&user, &test_profile("s1mple", 3800)).await.unwrap();

        assert!(store.delete(&user).await.unwrap());
        assert_eq!(store.get(&user).await.unwrap(), None);

        // Second delete reports nothing removed
        assert!(!store.delete(&user).await.unwrap());
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("links.json");

        let user = test_user("u1");
        let profile = test_profile("device", 3000);

        {
            let store = FileLinkStore::new(&path);
            store.put(&user, &profile).await.unwrap();
        }

        let reopened = FileLinkStore::new(&path);
        assert_eq!(reopened.get(&user).await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_file_store_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("deep").join("links.json");
        let store = FileLinkStore::new(&path);

        store
            .put(&test_user("u1"), &test_profile("s1mple", 3800))
            .await
            .unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_file_store_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("links.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileLinkStore::new(&path);
        let result = store.get(&test_user("u1")).await;

        assert!(matches!(result, Err(LinkStoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_file_store_keeps_links_independent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLinkStore::new(temp_dir.path().join("links.json"));

        let alice = test_user("alice");
        let bob = test_user("bob");
        store.put(&alice, &test_profile("a-nick", 1900)).await.unwrap();
        store.put(&bob, &test_profile("b-nick", 2200)).await.unwrap();

        store.delete(&alice).await.unwrap();

        assert_eq!(store.get(&alice).await.unwrap(), None);
        assert!(store.get(&bob).await.unwrap().is_some());
    }
}
