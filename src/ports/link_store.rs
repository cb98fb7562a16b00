//! Link Store Port - Interface for the account link storage.
//!
//! Persists the platform-user to FACEIT-profile mapping across process
//! restarts. The record format is opaque to the engine; a simple keyed
//! store suffices.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::player::FaceitProfile;

/// Port for durable account link storage.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Returns the linked profile for a user, if any.
    async fn get(&self, user_id: &UserId) -> Result<Option<FaceitProfile>, LinkStoreError>;

    /// Stores or replaces the link for a user.
    async fn put(&self, user_id: &UserId, profile: &FaceitProfile) -> Result<(), LinkStoreError>;

    /// Removes the link for a user, returning whether one existed.
    async fn delete(&self, user_id: &UserId) -> Result<bool, LinkStoreError>;
}

/// Link store errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkStoreError {
    /// Underlying storage failed.
    #[error("link store I/O error: {0}")]
    Io(String),

    /// Stored data could not be read or written as records.
    #[error("link store serialization error: {0}")]
    Serialization(String),
}

impl LinkStoreError {
    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}
