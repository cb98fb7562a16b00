//! ELO Source Port - Interface for the third-party rating provider.
//!
//! Abstracts profile resolution and rating lookups so the session
//! engine never couples to a concrete HTTP API. The production adapter
//! talks to the FACEIT Data API; tests script a mock.
//!
//! # Design
//!
//! - `resolve_profile` turns a nickname into an immutable profile
//!   snapshot (used at link time)
//! - `current_elo` fetches a fresh rating for an already-resolved
//!   profile (used for the start-balancing batch and the "my ELO" flow)
//! - both calls are independent per player; batch semantics live in the
//!   caller

use async_trait::async_trait;

use crate::domain::foundation::Elo;
use crate::domain::player::FaceitProfile;

/// Port for rating provider interactions.
#[async_trait]
pub trait EloSource: Send + Sync {
    /// Resolves a FACEIT nickname to a profile snapshot.
    async fn resolve_profile(&self, nickname: &str) -> Result<FaceitProfile, EloSourceError>;

    /// Fetches the current rating for a resolved profile.
    async fn current_elo(&self, profile: &FaceitProfile) -> Result<Elo, EloSourceError>;
}

/// Rating provider errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EloSourceError {
    /// No account exists under the given nickname.
    #[error("no FACEIT account named '{nickname}'")]
    ProfileNotFound {
        /// Nickname that failed to resolve.
        nickname: String,
    },

    /// The account exists but has no qualifying game history.
    #[error("no qualifying game stats for '{nickname}'")]
    StatsUnavailable {
        /// Nickname of the account.
        nickname: String,
    },

    /// The provider rejected or failed the request.
    #[error("upstream error: {message}")]
    Upstream {
        /// Error details.
        message: String,
    },

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl EloSourceError {
    /// Creates a profile not found error.
    pub fn profile_not_found(nickname: impl Into<String>) -> Self {
        Self::ProfileNotFound {
            nickname: nickname.into(),
        }
    }

    /// Creates a stats unavailable error.
    pub fn stats_unavailable(nickname: impl Into<String>) -> Self {
        Self::StatsUnavailable {
            nickname: nickname.into(),
        }
    }

    /// Creates an upstream error.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Returns true if retrying the request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EloSourceError::Upstream { .. } | EloSourceError::Timeout { .. }
        )
    }
}
