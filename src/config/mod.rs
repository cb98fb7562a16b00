//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `MIXMAKER_` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use mixmaker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Lobby size: {}", config.session.required_players);
//! ```

mod error;
mod faceit;
mod log;
mod session;
mod store;

pub use error::{ConfigError, ValidationError};
pub use faceit::FaceitConfig;
pub use log::LogConfig;
pub use session::SessionConfig;
pub use store::StoreConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the team mixer. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// FACEIT Data API access (key, base URL, timeouts)
    pub faceit: FaceitConfig,

    /// Session lifecycle tuning (lobby size, idle sweep)
    #[serde(default)]
    pub session: SessionConfig,

    /// Account link persistence
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MIXMAKER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MIXMAKER__FACEIT__API_KEY=...` -> `faceit.api_key = ...`
    /// - `MIXMAKER__SESSION__REQUIRED_PLAYERS=10` -> `session.required_players = 10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MIXMAKER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.faceit.validate()?;
        self.session.validate()?;
        self.store.validate()?;
        Ok(())
    }
}
