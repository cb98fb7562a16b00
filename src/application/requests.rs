//! Inbound request types for session operations.
//!
//! The host platform (a chat bot, a CLI, a test harness) translates its
//! own commands into these shapes; the engine never sees platform
//! surfaces directly.

use crate::domain::foundation::{ChannelId, UserId};

/// One session operation requested by a user in a channel.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    /// Channel whose session the action targets.
    pub channel_id: ChannelId,
    /// User issuing the action.
    pub actor: UserId,
    /// What to do.
    pub action: SessionAction,
}

impl SessionRequest {
    pub fn new(channel_id: ChannelId, actor: UserId, action: SessionAction) -> Self {
        Self {
            channel_id,
            actor,
            action,
        }
    }
}

/// The closed set of session actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Join the gathering roster.
    Join,
    /// Leave the gathering roster.
    Leave,
    /// Freeze the roster, fetch ratings, and build teams.
    StartBalancing,
    /// Re-run the balancer over the frozen snapshot.
    Rebalance {
        /// Tie-break seed; generated when absent.
        seed: Option<u64>,
    },
    /// Exchange members between the two teams.
    Swap {
        team_a_users: Vec<UserId>,
        team_b_users: Vec<UserId>,
    },
    /// Accept the assignment and close the session.
    Finalize,
    /// Abandon the session from any live phase.
    Cancel,
}

impl SessionAction {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Leave => "leave",
            Self::StartBalancing => "start_balancing",
            Self::Rebalance { .. } => "rebalance",
            Self::Swap { .. } => "swap",
            Self::Finalize => "finalize",
            Self::Cancel => "cancel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_names_are_stable() {
        assert_eq!(SessionAction::Join.name(), "join");
        assert_eq!(SessionAction::Rebalance { seed: Some(7) }.name(), "rebalance");
        assert_eq!(
            SessionAction::Swap {
                team_a_users: vec![],
                team_b_users: vec![]
            }
            .name(),
            "swap"
        );
    }
}
