//! Roster module - Teams, assignments, and the balancing logic.

mod assignment;
mod balancer;
mod errors;
mod swap;
mod team;

pub use assignment::Assignment;
pub use balancer::Balancer;
pub use errors::RosterError;
pub use swap::SwapCoordinator;
pub use team::{Team, TeamLabel};
