//! Session lifecycle configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Session lifecycle configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Players needed before balancing can start
    #[serde(default = "default_required_players")]
    pub required_players: usize,

    /// Players per team
    #[serde(default = "default_team_size")]
    pub team_size: usize,

    /// Inactivity in seconds before a session is swept
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// How often the sweeper scans, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl SessionConfig {
    /// Get the sweep interval as Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.required_players < 2 || self.required_players % 2 != 0 {
            return Err(ValidationError::InvalidRosterSize);
        }

        if self.team_size * 2 != self.required_players {
            return Err(ValidationError::InvalidTeamSplit);
        }

        if self.idle_timeout_secs == 0 || self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            required_players: default_required_players(),
            team_size: default_team_size(),
            idle_timeout_secs: default_idle_timeout(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_required_players() -> usize {
    10
}

fn default_team_size() -> usize {
    5
}

fn default_idle_timeout() -> u64 {
    1800
}

fn default_sweep_interval() -> u64 {
    60
}
