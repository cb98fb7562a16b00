//! FACEIT profile snapshot value object.

use crate::domain::foundation::{Elo, ValidationError};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of a FACEIT account at resolution time.
///
/// A profile is never mutated in place. Refreshing a rating produces a
/// new snapshot via [`FaceitProfile::with_elo`]. An `elo` of `None`
/// means the account exists but has no qualifying game history yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceitProfile {
    player_id: String,
    nickname: String,
    elo: Option<Elo>,
}

impl FaceitProfile {
    /// Creates a profile snapshot.
    pub fn new(
        player_id: impl Into<String>,
        nickname: impl Into<String>,
        elo: Option<Elo>,
    ) -> Result<Self, ValidationError> {
        let player_id = player_id.into();
        if player_id.is_empty() {
            return Err(ValidationError::empty_field("player_id"));
        }
        let nickname = nickname.into();
        if nickname.is_empty() {
            return Err(ValidationError::empty_field("nickname"));
        }
        Ok(Self {
            player_id,
            nickname,
            elo,
        })
    }

    /// Returns the upstream player identifier.
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Returns the FACEIT nickname.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Returns the rating carried by this snapshot, if any.
    pub fn elo(&self) -> Option<Elo> {
        self.elo
    }

    /// Whether the account has a usable rating.
    pub fn has_elo(&self) -> bool {
        self.elo.is_some()
    }

    /// Produces a new snapshot carrying the given rating.
    pub fn with_elo(&self, elo: Elo) -> Self {
        Self {
            player_id: self.player_id.clone(),
            nickname: self.nickname.clone(),
            elo: Some(elo),
        }
    }
}
