//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid FACEIT base URL format")]
    InvalidBaseUrl,

    #[error("Required players must be an even count of at least 2")]
    InvalidRosterSize,

    #[error("Team size must be half of required players")]
    InvalidTeamSplit,

    #[error("Timeouts and intervals must be non-zero")]
    InvalidTimeout,
}
