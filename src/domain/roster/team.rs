//! Team value objects.

use crate::domain::foundation::UserId;
use crate::domain::player::Participant;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the split a team is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamLabel {
    A,
    B,
}

impl TeamLabel {
    /// Returns the opposing label.
    pub fn other(&self) -> Self {
        match self {
            TeamLabel::A => TeamLabel::B,
            TeamLabel::B => TeamLabel::A,
        }
    }
}

impl fmt::Display for TeamLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamLabel::A => write!(f, "A"),
            TeamLabel::B => write!(f, "B"),
        }
    }
}

/// One side of a balanced split.
///
/// Member order is insertion order and matters for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    label: TeamLabel,
    members: Vec<Participant>,
}

impl Team {
    /// Creates a team from its members.
    pub fn new(label: TeamLabel, members: Vec<Participant>) -> Self {
        Self { label, members }
    }

    /// Returns the team label.
    pub fn label(&self) -> TeamLabel {
        self.label
    }

    /// Returns the members in display order.
    pub fn members(&self) -> &[Participant] {
        &self.members
    }

    /// Returns the member count.
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Checks whether a user is on this team.
    pub fn contains(&self, user_id: &UserId) -> bool {
        self.members.iter().any(|p| p.user_id() == user_id)
    }

    /// Sums the rated members' ELO points.
    pub fn total_elo(&self) -> u64 {
        self.members
            .iter()
            .filter_map(|p| p.elo())
            .map(|elo| u64::from(elo.points()))
            .sum()
    }
}
