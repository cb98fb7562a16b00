//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `player` - FACEIT profile snapshots and session participants
//! - `roster` - Teams, assignments, balancer, and swap coordinator
//! - `session` - Balancing session state machine and view models

pub mod foundation;
pub mod player;
pub mod roster;
pub mod session;
