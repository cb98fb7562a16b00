//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `faceit` - ELO source implementations (FACEIT Data API, mock)
//! - `link_store` - Account link persistence (JSON file, in-memory)

pub mod faceit;
pub mod link_store;

pub use faceit::{FaceitClient, FaceitClientConfig, MockEloSource};
pub use link_store::{FileLinkStore, InMemoryLinkStore};
