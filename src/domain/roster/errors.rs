//! Roster-specific error types.

use crate::domain::foundation::{ErrorCode, UserId};

/// Errors raised while building or adjusting a team assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Participant count does not match the required roster size.
    InsufficientPlayers { have: usize, need: usize },
    /// A participant has no rating to balance on.
    UnresolvedProfile { user_id: UserId },
    /// Swap selection violates cardinality or membership rules.
    InvalidSwapSelection(String),
}

impl RosterError {
    pub fn insufficient_players(have: usize, need: usize) -> Self {
        RosterError::InsufficientPlayers { have, need }
    }

    pub fn unresolved_profile(user_id: UserId) -> Self {
        RosterError::UnresolvedProfile { user_id }
    }

    pub fn invalid_swap(reason: impl Into<String>) -> Self {
        RosterError::InvalidSwapSelection(reason.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RosterError::InsufficientPlayers { .. } => ErrorCode::InsufficientPlayers,
            RosterError::UnresolvedProfile { .. } => ErrorCode::UnresolvedProfile,
            RosterError::InvalidSwapSelection(_) => ErrorCode::InvalidSwapSelection,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RosterError::InsufficientPlayers { have, need } => {
                format!("Roster needs exactly {} players, got {}", need, have)
            }
            RosterError::UnresolvedProfile { user_id } => {
                format!("Participant {} has no rating", user_id)
            }
            RosterError::InvalidSwapSelection(reason) => {
                format!("Invalid swap selection: {}", reason)
            }
        }
    }
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RosterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_players_carries_counts() {
        let err = RosterError::insufficient_players(7, 10);
        assert_eq!(err.code(), ErrorCode::InsufficientPlayers);
        assert_eq!(err.message(), "Roster needs exactly 10 players, got 7");
    }

    #[test]
    fn unresolved_profile_names_the_user() {
        let err = RosterError::unresolved_profile(UserId::new("u42").unwrap());
        assert_eq!(err.code(), ErrorCode::UnresolvedProfile);
        assert!(err.message().contains("u42"));
    }

    #[test]
    fn invalid_swap_carries_reason() {
        let err = RosterError::invalid_swap("selections must be the same size");
        assert_eq!(err.code(), ErrorCode::InvalidSwapSelection);
        assert_eq!(
            format!("{}", err),
            "Invalid swap selection: selections must be the same size"
        );
    }
}
