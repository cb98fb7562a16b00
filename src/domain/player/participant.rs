//! Session participant entity.

use crate::domain::foundation::{Elo, UserId};
use serde::{Deserialize, Serialize};

use super::FaceitProfile;

/// A platform user enrolled in a session.
///
/// Joining requires an existing account link, so every participant
/// carries a profile snapshot from the moment of joining. The snapshot
/// is replaced wholesale when ratings are frozen at balancing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    user_id: UserId,
    profile: FaceitProfile,
}

impl Participant {
    /// Creates a participant from a user and their linked profile.
    pub fn new(user_id: UserId, profile: FaceitProfile) -> Self {
        Self { user_id, profile }
    }

    /// Returns the platform user id.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the current profile snapshot.
    pub fn profile(&self) -> &FaceitProfile {
        &self.profile
    }

    /// Returns the FACEIT nickname used for display.
    pub fn display_name(&self) -> &str {
        self.profile.nickname()
    }

    /// Returns the rating carried by the current snapshot, if any.
    pub fn elo(&self) -> Option<Elo> {
        self.profile.elo()
    }

    /// Produces a participant carrying a freshly fetched rating.
    pub fn with_snapshot(&self, elo: Elo) -> Self {
        Self {
            user_id: self.user_id.clone(),
            profile: self.profile.with_elo(elo),
        }
    }
}
