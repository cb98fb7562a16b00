//! FACEIT Adapters.
//!
//! Implementations of the EloSource port backed by the FACEIT Data API.
//!
//! ## Available Adapters
//!
//! - `FaceitClient` - HTTP client for the FACEIT Data API v4
//! - `MockEloSource` - Configurable mock for testing

mod client;
mod mock;

pub use client::{FaceitClient, FaceitClientConfig};
pub use mock::MockEloSource;
