//! Player module - Linked accounts and session participants.

mod nickname;
mod participant;
mod profile;

pub use nickname::extract_nickname;
pub use participant::Participant;
pub use profile::FaceitProfile;
