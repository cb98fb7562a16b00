//! Application layer - Services orchestrating domain operations.
//!
//! This layer coordinates sessions, account links, and background
//! cleanup over the ports. It owns all locking; the domain stays pure.

pub mod linking;
pub mod registry;
pub mod requests;
pub mod service;
pub mod sweeper;

pub use linking::{LinkError, LinkService, LinkedElo};
pub use registry::{SessionCell, SessionRegistry};
pub use requests::{SessionAction, SessionRequest};
pub use service::MixService;
pub use sweeper::{IdleSweeper, IdleSweeperConfig};
