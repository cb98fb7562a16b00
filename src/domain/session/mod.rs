//! Session module - The balancing session state machine.

mod aggregate;
mod errors;
mod phase;
mod view;

pub use aggregate::Session;
pub use errors::SessionError;
pub use phase::SessionPhase;
pub use view::{AssignmentView, ParticipantView, SessionView, TeamView};
