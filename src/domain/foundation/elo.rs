//! ELO rating value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A FACEIT ELO rating snapshot.
///
/// Ratings are whole points as reported by the upstream profile API.
/// A participant with no qualifying match history carries no rating at
/// all (`Option<Elo>`), which is distinct from a rating of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Elo(u32);

impl Elo {
    /// Creates a rating from raw points.
    pub fn new(points: u32) -> Self {
        Self(points)
    }

    /// Returns the raw point value.
    pub fn points(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Elo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Elo {
    fn from(points: u32) -> Self {
        Self(points)
    }
}
