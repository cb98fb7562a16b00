//! Link store configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Link store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Location of the account link file
    #[serde(default = "default_links_path")]
    pub links_path: PathBuf,
}

impl StoreConfig {
    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.links_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired(
                "MIXMAKER__STORE__LINKS_PATH",
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            links_path: default_links_path(),
        }
    }
}

fn default_links_path() -> PathBuf {
    PathBuf::from("data/links.json")
}
