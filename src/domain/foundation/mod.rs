//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form
//! the vocabulary of the team mixing domain.

mod elo;
mod errors;
mod ids;
mod timestamp;

pub use elo::Elo;
pub use errors::{ErrorCode, ValidationError};
pub use ids::{ChannelId, SessionId, UserId};
pub use timestamp::Timestamp;
