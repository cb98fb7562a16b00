//! Two-team assignment produced by the balancer.

use crate::domain::foundation::UserId;
use crate::domain::player::Participant;
use serde::{Deserialize, Serialize};

use super::{Team, TeamLabel};

/// The concrete two-team split of a full roster.
///
/// Invariant: the two member sets partition the session participants
/// exactly. The balancer and swap coordinator are the only producers,
/// and both preserve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    team_a: Team,
    team_b: Team,
}

impl Assignment {
    /// Builds an assignment from the two member lists.
    pub fn new(team_a_members: Vec<Participant>, team_b_members: Vec<Participant>) -> Self {
        Self {
            team_a: Team::new(TeamLabel::A, team_a_members),
            team_b: Team::new(TeamLabel::B, team_b_members),
        }
    }

    /// Returns team A.
    pub fn team_a(&self) -> &Team {
        &self.team_a
    }

    /// Returns team B.
    pub fn team_b(&self) -> &Team {
        &self.team_b
    }

    /// Returns the team with the given label.
    pub fn team(&self, label: TeamLabel) -> &Team {
        match label {
            TeamLabel::A => &self.team_a,
            TeamLabel::B => &self.team_b,
        }
    }

    /// Total ELO points of the labelled team.
    pub fn total_elo(&self, label: TeamLabel) -> u64 {
        self.team(label).total_elo()
    }

    /// Absolute difference between the two team totals.
    pub fn elo_difference(&self) -> u64 {
        self.team_a.total_elo().abs_diff(self.team_b.total_elo())
    }

    /// Locates which team a user is on.
    pub fn side_of(&self, user_id: &UserId) -> Option<TeamLabel> {
        if self.team_a.contains(user_id) {
            Some(TeamLabel::A)
        } else if self.team_b.contains(user_id) {
            Some(TeamLabel::B)
        } else {
            None
        }
    }

    /// Iterates all assigned participants, team A first.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.team_a.members().iter().chain(self.team_b.members())
    }
}
