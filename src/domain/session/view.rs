//! Render-agnostic view models returned to the caller layer.

use crate::domain::foundation::SessionId;
use crate::domain::player::Participant;
use crate::domain::roster::{Assignment, Team, TeamLabel};
use serde::{Deserialize, Serialize};

use super::SessionPhase;

/// One participant as presented to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub user_id: String,
    pub display_name: String,
    /// None until a rating snapshot exists for this participant.
    pub elo: Option<u32>,
}

impl ParticipantView {
    pub(crate) fn of(participant: &Participant) -> Self {
        Self {
            user_id: participant.user_id().to_string(),
            display_name: participant.display_name().to_string(),
            elo: participant.elo().map(|e| e.points()),
        }
    }
}

/// One team roster in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamView {
    pub label: TeamLabel,
    pub members: Vec<ParticipantView>,
}

impl TeamView {
    pub(crate) fn of(team: &Team) -> Self {
        Self {
            label: team.label(),
            members: team.members().iter().map(ParticipantView::of).collect(),
        }
    }
}

/// The current two-team split with its totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentView {
    pub team_a: TeamView,
    pub team_b: TeamView,
    pub total_elo_a: u64,
    pub total_elo_b: u64,
    pub elo_difference: u64,
}

impl AssignmentView {
    pub(crate) fn of(assignment: &Assignment) -> Self {
        Self {
            team_a: TeamView::of(assignment.team_a()),
            team_b: TeamView::of(assignment.team_b()),
            total_elo_a: assignment.total_elo(TeamLabel::A),
            total_elo_b: assignment.total_elo(TeamLabel::B),
            elo_difference: assignment.elo_difference(),
        }
    }
}

/// Full session snapshot returned after every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub channel_id: String,
    pub phase: SessionPhase,
    pub participants: Vec<ParticipantView>,
    pub assignment: Option<AssignmentView>,
}
