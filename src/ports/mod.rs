//! Ports layer - Capability interfaces the engine consumes.
//!
//! Each port is an async trait implemented by one production adapter
//! and one in-memory/mock adapter. The engine only ever sees the trait.

mod elo_source;
mod link_store;

pub use elo_source::{EloSource, EloSourceError};
pub use link_store::{LinkStore, LinkStoreError};
