//! LinkService - Account linking between platform users and FACEIT.
//!
//! A user links once; every later session pulls their profile from the
//! store instead of asking them for a nickname again. Linking resolves
//! the account up front so a stored profile is always usable in a
//! session.

use std::sync::Arc;

use crate::domain::foundation::{Elo, UserId};
use crate::domain::player::{extract_nickname, FaceitProfile};
use crate::ports::{EloSource, EloSourceError, LinkStore, LinkStoreError};

/// A stored link paired with a live rating read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedElo {
    /// Profile as persisted at link time.
    pub profile: FaceitProfile,
    /// Rating fetched for this request.
    pub current_elo: Elo,
}

/// Linking errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// Input was neither a nickname nor a recognizable profile URL.
    #[error("invalid link input: {0}")]
    InvalidInput(String),

    /// No FACEIT account exists under the given nickname.
    #[error("no FACEIT account named '{0}'")]
    ProfileNotFound(String),

    /// The account exists but has no rated game history.
    #[error("FACEIT account '{0}' has no rated game history")]
    NoGameStats(String),

    /// The user has no stored link.
    #[error("no FACEIT account linked")]
    NotLinked,

    /// The rating provider failed.
    #[error("ELO source error: {0}")]
    Source(#[from] EloSourceError),

    /// The link store failed.
    #[error("link store error: {0}")]
    Store(#[from] LinkStoreError),
}

/// Application service for account links.
pub struct LinkService {
    elo_source: Arc<dyn EloSource>,
    link_store: Arc<dyn LinkStore>,
}

impl LinkService {
    pub fn new(elo_source: Arc<dyn EloSource>, link_store: Arc<dyn LinkStore>) -> Self {
        Self {
            elo_source,
            link_store,
        }
    }

    /// Link a user to a FACEIT account given a nickname or profile URL.
    ///
    /// Accounts without a rating are rejected rather than stored.
    /// Linking again overwrites the previous link.
    pub async fn link(&self, user_id: &UserId, input: &str) -> Result<FaceitProfile, LinkError> {
        let nickname =
            extract_nickname(input).map_err(|e| LinkError::InvalidInput(e.to_string()))?;

        let profile = match self.elo_source.resolve_profile(&nickname).await {
            Ok(profile) => profile,
            Err(EloSourceError::ProfileNotFound { nickname }) => {
                return Err(LinkError::ProfileNotFound(nickname));
            }
            Err(e) => return Err(LinkError::Source(e)),
        };

        if profile.elo().is_none() {
            return Err(LinkError::NoGameStats(nickname));
        }

        self.link_store.put(user_id, &profile).await?;

        tracing::info!(
            user_id = %user_id,
            nickname = profile.nickname(),
            "FACEIT account linked"
        );
        Ok(profile)
    }

    /// Remove a user's link.
    pub async fn unlink(&self, user_id: &UserId) -> Result<(), LinkError> {
        let existed = self.link_store.delete(user_id).await?;
        if !existed {
            return Err(LinkError::NotLinked);
        }

        tracing::info!(user_id = %user_id, "FACEIT account unlinked");
        Ok(())
    }

    /// Look up a user's stored link, if any.
    pub async fn linked_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<FaceitProfile>, LinkError> {
        Ok(self.link_store.get(user_id).await?)
    }

    /// Fetch a live rating for a user's linked account.
    pub async fn linked_elo(&self, user_id: &UserId) -> Result<LinkedElo, LinkError> {
        let profile = self
            .link_store
            .get(user_id)
            .await?
            .ok_or(LinkError::NotLinked)?;

        let current_elo = self.elo_source.current_elo(&profile).await?;

        Ok(LinkedElo {
            profile,
            current_elo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::faceit::MockEloSource;
    use crate::adapters::link_store::InMemoryLinkStore;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn service_with(source: MockEloSource) -> (LinkService, InMemoryLinkStore) {
        let store = InMemoryLinkStore::new();
        let service = LinkService::new(Arc::new(source), Arc::new(store.clone()));
        (service, store)
    }

    // ─── Link ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn link_by_nickname_stores_the_profile() {
        let source = MockEloSource::new().with_player("s1mple", "pid-1", 3800);
        let (service, store) = service_with(source);

        let profile = service.link(&user("u1"), "s1mple").await.unwrap();

        assert_eq!(profile.nickname(), "s1mple");
        assert_eq!(store.get(&user("u1")).await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn link_accepts_profile_urls() {
        let source = MockEloSource::new().with_player("s1mple", "pid-1", 3800);
        let (service, _) = service_with(source);

        let profile = service
            .link(&user("u1"), "https://faceit.com/en/players/s1mple")
            .await
            .unwrap();

        assert_eq!(profile.nickname(), "s1mple");
    }

    #[tokio::test]
    async fn link_rejects_unknown_accounts() {
        let (service, store) = service_with(MockEloSource::new());

        let result = service.link(&user("u1"), "ghost").await;

        assert_eq!(result, Err(LinkError::ProfileNotFound("ghost".to_string())));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn link_rejects_accounts_without_rating() {
        let source = MockEloSource::new().with_unrated_player("fresh", "pid-9");
        let (service, store) = service_with(source);

        let result = service.link(&user("u1"), "fresh").await;

        assert_eq!(result, Err(LinkError::NoGameStats("fresh".to_string())));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn link_rejects_unusable_input() {
        let (service, _) = service_with(MockEloSource::new());

        let result = service.link(&user("u1"), "   ").await;

        assert!(matches!(result, Err(LinkError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn relink_overwrites_the_previous_account() {
        let source = MockEloSource::new()
            .with_player("old-main", "pid-1", 2000)
            .with_player("new-main", "pid-2", 2400);
        let (service, store) = service_with(source);

        service.link(&user("u1"), "old-main").await.unwrap();
        service.link(&user("u1"), "new-main").await.unwrap();

        let stored = store.get(&user("u1")).await.unwrap().unwrap();
        assert_eq!(stored.nickname(), "new-main");
        assert_eq!(store.len().await, 1);
    }

    // ─── Unlink ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn unlink_removes_the_stored_link() {
        let source = MockEloSource::new().with_player("s1mple", "pid-1", 3800);
        let (service, store) = service_with(source);
        service.link(&user("u1"), "s1mple").await.unwrap();

        service.unlink(&user("u1")).await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unlink_without_a_link_reports_not_linked() {
        let (service, _) = service_with(MockEloSource::new());

        let result = service.unlink(&user("u1")).await;

        assert_eq!(result, Err(LinkError::NotLinked));
    }

    // ─── Linked ELO ──────────────────────────────────────────────────

    #[tokio::test]
    async fn linked_elo_returns_the_live_rating() {
        let source = MockEloSource::new().with_player("s1mple", "pid-1", 3700);
        let (service, _) = service_with(source.clone());
        service.link(&user("u1"), "s1mple").await.unwrap();

        // Rating moved since link time
        let _ = source.with_current_elo("s1mple", 3810);

        let report = service.linked_elo(&user("u1")).await.unwrap();
        assert_eq!(report.current_elo, Elo::new(3810));
        assert_eq!(report.profile.nickname(), "s1mple");
    }

    #[tokio::test]
    async fn linked_elo_without_a_link_reports_not_linked() {
        let (service, _) = service_with(MockEloSource::new());

        let result = service.linked_elo(&user("u1")).await;

        assert_eq!(result, Err(LinkError::NotLinked));
    }

    #[tokio::test]
    async fn linked_profile_reads_without_fetching() {
        let source = MockEloSource::new().with_player("s1mple", "pid-1", 3800);
        let (service, _) = service_with(source.clone());
        service.link(&user("u1"), "s1mple").await.unwrap();

        let elo_calls_before = source.elo_call_count();
        let profile = service.linked_profile(&user("u1")).await.unwrap();

        assert!(profile.is_some());
        assert_eq!(source.elo_call_count(), elo_calls_before);
    }
}
