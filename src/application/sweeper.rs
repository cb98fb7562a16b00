//! IdleSweeper - Background cleanup of abandoned sessions.
//!
//! A session whose roster never fills would otherwise hold its channel
//! forever. The sweeper periodically cancels sessions whose activity
//! clock has passed the idle timeout and frees their channels.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `sweep_interval` | 60s | How often to scan the registry |
//! | `idle_timeout_secs` | 1800 | Inactivity after which a session is cancelled |
//!
//! ## Graceful Shutdown
//!
//! The service listens on a watch channel and stops when signalled.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::application::registry::SessionRegistry;
use crate::domain::foundation::Timestamp;

/// Configuration for the IdleSweeper service.
#[derive(Debug, Clone)]
pub struct IdleSweeperConfig {
    /// How often to scan for idle sessions.
    pub sweep_interval: Duration,

    /// Inactivity threshold in seconds.
    pub idle_timeout_secs: u64,
}

impl Default for IdleSweeperConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(60),
            idle_timeout_secs: 1800,
        }
    }
}

impl IdleSweeperConfig {
    /// Create config with a custom sweep interval.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Create config with a custom idle timeout.
    pub fn with_idle_timeout_secs(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }
}

/// Background service that cancels idle sessions.
pub struct IdleSweeper {
    registry: Arc<SessionRegistry>,
    config: IdleSweeperConfig,
}

impl IdleSweeper {
    /// Create a sweeper with default configuration.
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self {
            registry,
            config: IdleSweeperConfig::default(),
        }
    }

    /// Create a sweeper with custom configuration.
    pub fn with_config(registry: Arc<SessionRegistry>, config: IdleSweeperConfig) -> Self {
        Self { registry, config }
    }

    /// Run the sweep loop until the shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.sweep_interval);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.sweep_once().await;
                }
            }
        }
    }

    /// Run one sweep pass, returning how many sessions were cancelled.
    ///
    /// Cells are snapshotted first so no session lock is taken while the
    /// registry map is held open. Removal re-checks cell identity, which
    /// keeps a session opened on the channel mid-sweep safe from eviction.
    pub async fn sweep_once(&self) -> usize {
        let now = Timestamp::now();
        let cells = self.registry.cells().await;
        let mut swept = 0;

        for (channel_id, cell) in cells {
            let expired = {
                let mut session = cell.lock().await;
                if session.is_expired(&now, self.config.idle_timeout_secs) {
                    // Cancel is a no-op error on already-terminal sessions;
                    // removal below still applies to them
                    let _ = session.cancel();
                    true
                } else {
                    false
                }
            };

            if expired && self.registry.remove_if_same(&channel_id, &cell).await {
                swept += 1;
                tracing::info!(channel_id = %channel_id, "Idle session cancelled");
            }
        }

        swept
    }
}
