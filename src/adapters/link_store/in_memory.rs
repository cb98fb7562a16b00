//! In-memory link store implementation for testing and development.
//!
//! Keeps account links in a HashMap behind a RwLock. Links do not
//! survive a restart; use FileLinkStore for persistence.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::domain::player::FaceitProfile;
use crate::ports::{LinkStore, LinkStoreError};

/// In-memory storage for account links.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLinkStore {
    /// Links keyed by user id.
    links: Arc<RwLock<HashMap<String, FaceitProfile>>>,
}

impl InMemoryLinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a link, consuming and returning the store for chaining.
    pub async fn with_link(self, user_id: &UserId, profile: FaceitProfile) -> Self {
        self.links
            .write()
            .await
            .insert(user_id.as_str().to_string(), profile);
        self
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }

    /// Whether the store holds no links.
    pub async fn is_empty(&self) -> bool {
        self.links.read().await.is_empty()
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<FaceitProfile>, LinkStoreError> {
        let links = self.links.read().await;
        Ok(links.get(user_id.as_str()).cloned())
    }

    async fn put(&self, user_id: &UserId, profile: &FaceitProfile) -> Result<(), LinkStoreError> {
        let mut links = self.links.write().await;
        links.insert(user_id.as_str().to_string(), profile.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool, LinkStoreError> {
        let mut links = self.links.write().await;
        Ok(links.remove(user_id.as_str()).is_some())
    }
}
