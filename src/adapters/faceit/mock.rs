//! Mock ELO source for testing.
//!
//! Provides a scriptable implementation of the EloSource port so tests
//! run without the FACEIT API.
//!
//! # Features
//!
//! - Per-nickname profiles and current ratings
//! - Error injection for resilience testing
//! - Simulated latency for busy-phase and cancellation testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let source = MockEloSource::new()
//!     .with_player("s1mple", "pid-1", 3800)
//!     .with_delay(Duration::from_millis(50));
//!
//! let profile = source.resolve_profile("s1mple").await?;
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::Elo;
use crate::domain::player::FaceitProfile;
use crate::ports::{EloSource, EloSourceError};

/// Scripted behavior for one nickname.
#[derive(Debug, Clone)]
struct PlayerScript {
    profile: FaceitProfile,
    current: Result<Elo, EloSourceError>,
}

/// Mock ELO source for testing.
#[derive(Debug, Clone, Default)]
pub struct MockEloSource {
    /// Scripted players by nickname.
    players: Arc<Mutex<HashMap<String, PlayerScript>>>,
    /// Errors returned from resolve_profile for specific nicknames.
    resolve_errors: Arc<Mutex<HashMap<String, EloSourceError>>>,
    /// Simulated latency per call.
    delay: Duration,
    /// Call counters for verification.
    resolve_calls: Arc<AtomicUsize>,
    elo_calls: Arc<AtomicUsize>,
}

impl MockEloSource {
    /// Creates an empty mock; unknown nicknames resolve to ProfileNotFound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rated player.
    pub fn with_player(self, nickname: &str, player_id: &str, elo: u32) -> Self {
        let profile = FaceitProfile::new(player_id, nickname, Some(Elo::new(elo)))
            .expect("valid mock profile");
        self.players.lock().unwrap().insert(
            nickname.to_string(),
            PlayerScript {
                profile,
                current: Ok(Elo::new(elo)),
            },
        );
        self
    }

    /// Registers a player with an account but no qualifying history.
    pub fn with_unrated_player(self, nickname: &str, player_id: &str) -> Self {
        let profile =
            FaceitProfile::new(player_id, nickname, None).expect("valid mock profile");
        self.players.lock().unwrap().insert(
            nickname.to_string(),
            PlayerScript {
                profile,
                current: Err(EloSourceError::stats_unavailable(nickname)),
            },
        );
        self
    }

    /// Overrides the current rating returned for a registered player.
    pub fn with_current_elo(self, nickname: &str, elo: u32) -> Self {
        if let Some(script) = self.players.lock().unwrap().get_mut(nickname) {
            script.current = Ok(Elo::new(elo));
        }
        self
    }

    /// Makes current_elo fail for a registered player.
    pub fn with_elo_error(self, nickname: &str, error: EloSourceError) -> Self {
        if let Some(script) = self.players.lock().unwrap().get_mut(nickname) {
            script.current = Err(error);
        }
        self
    }

    /// Makes resolve_profile fail for a nickname.
    pub fn with_resolve_error(self, nickname: &str, error: EloSourceError) -> Self {
        self.resolve_errors
            .lock()
            .unwrap()
            .insert(nickname.to_string(), error);
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns how many resolve_profile calls were made.
    pub fn resolve_call_count(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    /// Returns how many current_elo calls were made.
    pub fn elo_call_count(&self) -> usize {
        self.elo_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EloSource for MockEloSource {
    async fn resolve_profile(&self, nickname: &str) -> Result<FaceitProfile, EloSourceError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if let Some(error) = self.resolve_errors.lock().unwrap().get(nickname) {
            return Err(error.clone());
        }

        self.players
            .lock()
            .unwrap()
            .get(nickname)
            .map(|script| script.profile.clone())
            .ok_or_else(|| EloSourceError::profile_not_found(nickname))
    }

    async fn current_elo(&self, profile: &FaceitProfile) -> Result<Elo, EloSourceError> {
        self.elo_calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.players
            .lock()
            .unwrap()
            .get(profile.nickname())
            .map(|script| script.current.clone())
            .unwrap_or_else(|| Err(EloSourceError::profile_not_found(profile.nickname())))
    }
}
