//! FACEIT Data API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// FACEIT Data API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FaceitConfig {
    /// Server-side API key for the Data API
    pub api_key: String,

    /// Base URL of the Data API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl FaceitConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate FACEIT configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingRequired(
                "MIXMAKER__FACEIT__API_KEY",
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "https://open.faceit.com/data/v4".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    2
}
