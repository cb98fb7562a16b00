//! FACEIT Data API client - production implementation of EloSource.
//!
//! Talks to the FACEIT Data API v4 player endpoint. Ratings come from
//! the CS2 game entry, falling back to the legacy CS:GO entry for
//! accounts that never migrated.
//!
//! # Configuration
//!
//! ```ignore
//! let config = FaceitClientConfig::new(api_key)
//!     .with_timeout(Duration::from_secs(10))
//!     .with_max_retries(2);
//!
//! let source = FaceitClient::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::Elo;
use crate::domain::player::FaceitProfile;
use crate::ports::{EloSource, EloSourceError};

/// Configuration for the FACEIT client.
#[derive(Debug, Clone)]
pub struct FaceitClientConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the Data API (default: https://open.faceit.com/data/v4).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl FaceitClientConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://open.faceit.com/data/v4".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// FACEIT Data API client.
pub struct FaceitClient {
    config: FaceitClientConfig,
    client: Client,
}

impl FaceitClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: FaceitClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the player lookup endpoint URL.
    fn players_url(&self) -> String {
        format!("{}/players", self.config.base_url)
    }

    /// Fetches a player record, retrying transient failures with
    /// exponential backoff.
    async fn fetch_player(&self, nickname: &str) -> Result<PlayerDto, EloSourceError> {
        let mut last_error = EloSourceError::upstream("no attempts made");
        let mut retry_count = 0;

        while retry_count <= self.config.max_retries {
            match self.try_fetch_player(nickname).await {
                Ok(player) => return Ok(player),
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    tracing::debug!(
                        nickname,
                        attempt = retry_count + 1,
                        error = %err,
                        "FACEIT lookup failed, retrying"
                    );
                    last_error = err;
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            let delay = Duration::from_secs(1 << retry_count);
            sleep(delay).await;
            retry_count += 1;
        }

        Err(last_error)
    }

    /// Performs a single lookup attempt.
    async fn try_fetch_player(&self, nickname: &str) -> Result<PlayerDto, EloSourceError> {
        let response = self
            .client
            .get(self.players_url())
            .query(&[("nickname", nickname)])
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key()),
            )
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EloSourceError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    EloSourceError::upstream(format!("connection failed: {}", e))
                } else {
                    EloSourceError::upstream(e.to_string())
                }
            })?;

        let response = self.handle_response_status(nickname, response).await?;

        response
            .json::<PlayerDto>()
            .await
            .map_err(|e| EloSourceError::upstream(format!("failed to parse response: {}", e)))
    }

    /// Maps non-success statuses onto the port error taxonomy.
    async fn handle_response_status(
        &self,
        nickname: &str,
        response: Response,
    ) -> Result<Response, EloSourceError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            404 => Err(EloSourceError::profile_not_found(nickname)),
            401 | 403 => Err(EloSourceError::upstream(
                "FACEIT rejected the API key".to_string(),
            )),
            429 => Err(EloSourceError::upstream("rate limited".to_string())),
            500..=599 => Err(EloSourceError::upstream(format!(
                "server error {}: {}",
                status, error_body
            ))),
            _ => Err(EloSourceError::upstream(format!(
                "unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl EloSource for FaceitClient {
    async fn resolve_profile(&self, nickname: &str) -> Result<FaceitProfile, EloSourceError> {
        let player = self.fetch_player(nickname).await?;
        let elo = extract_elo(&player.games);

        FaceitProfile::new(player.player_id, player.nickname, elo)
            .map_err(|e| EloSourceError::upstream(format!("malformed player record: {}", e)))
    }

    async fn current_elo(&self, profile: &FaceitProfile) -> Result<Elo, EloSourceError> {
        let player = self.fetch_player(profile.nickname()).await?;

        extract_elo(&player.games)
            .ok_or_else(|| EloSourceError::stats_unavailable(profile.nickname()))
    }
}

/// Picks the usable rating out of a player's game entries.
///
/// CS2 wins over the legacy CS:GO entry; a missing or zero rating
/// counts as no qualifying history.
fn extract_elo(games: &GamesDto) -> Option<Elo> {
    let cs2 = games.cs2.as_ref().and_then(|g| g.faceit_elo);
    let csgo = games.csgo.as_ref().and_then(|g| g.faceit_elo);

    match cs2.or(csgo) {
        Some(points) if points > 0 => Some(Elo::new(points)),
        _ => None,
    }
}

// ----- FACEIT API Types -----

#[derive(Debug, Deserialize)]
struct PlayerDto {
    player_id: String,
    nickname: String,
    #[serde(default)]
    games: GamesDto,
}

#[derive(Debug, Default, Deserialize)]
struct GamesDto {
    cs2: Option<GameStatsDto>,
    csgo: Option<GameStatsDto>,
}

#[derive(Debug, Deserialize)]
struct GameStatsDto {
    faceit_elo: Option<u32>,
}
