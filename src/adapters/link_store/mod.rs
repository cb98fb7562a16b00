//! Link Store Adapters.
//!
//! Implementations of the LinkStore port for persisting account links.
//!
//! ## Available Adapters
//!
//! - `FileLinkStore` - Single JSON file on disk, survives restarts
//! - `InMemoryLinkStore` - HashMap-backed store for testing

mod file;
mod in_memory;

pub use file::FileLinkStore;
pub use in_memory::InMemoryLinkStore;
