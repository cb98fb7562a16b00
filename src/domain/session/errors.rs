//! Session-specific error types.

use crate::domain::foundation::{ChannelId, ErrorCode, UserId};
use crate::domain::roster::RosterError;

use super::SessionPhase;

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No open session for the channel.
    NotFound(ChannelId),
    /// The channel already has an open session.
    AlreadyOpen(ChannelId),
    /// Rating fetch in flight; mutation rejected.
    Busy,
    /// Roster already at capacity.
    Full { capacity: usize },
    /// User is already a participant.
    AlreadyJoined(UserId),
    /// User is not a participant.
    NotJoined(UserId),
    /// User has no linked FACEIT account.
    NotLinked(UserId),
    /// Action is not valid in the current phase.
    InvalidTransition {
        phase: SessionPhase,
        action: &'static str,
    },
    /// Participant count does not match the required roster size.
    InsufficientPlayers { have: usize, need: usize },
    /// A participant has no rating to balance on.
    UnresolvedProfile { user_id: UserId },
    /// Swap selection violates cardinality or membership rules.
    InvalidSwapSelection(String),
    /// The rating batch fetch failed; roster kept, no snapshot taken.
    EloFetchFailed(String),
    /// Link store failure.
    Store(String),
}

impl SessionError {
    pub fn not_found(channel_id: ChannelId) -> Self {
        SessionError::NotFound(channel_id)
    }

    pub fn already_open(channel_id: ChannelId) -> Self {
        SessionError::AlreadyOpen(channel_id)
    }

    pub fn busy() -> Self {
        SessionError::Busy
    }

    pub fn full(capacity: usize) -> Self {
        SessionError::Full { capacity }
    }

    pub fn already_joined(user_id: UserId) -> Self {
        SessionError::AlreadyJoined(user_id)
    }

    pub fn not_joined(user_id: UserId) -> Self {
        SessionError::NotJoined(user_id)
    }

    pub fn not_linked(user_id: UserId) -> Self {
        SessionError::NotLinked(user_id)
    }

    pub fn invalid_transition(phase: SessionPhase, action: &'static str) -> Self {
        SessionError::InvalidTransition { phase, action }
    }

    pub fn elo_fetch_failed(message: impl Into<String>) -> Self {
        SessionError::EloFetchFailed(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        SessionError::Store(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::AlreadyOpen(_) => ErrorCode::SessionAlreadyOpen,
            SessionError::Busy => ErrorCode::SessionBusy,
            SessionError::Full { .. } => ErrorCode::SessionFull,
            SessionError::AlreadyJoined(_) => ErrorCode::AlreadyJoined,
            SessionError::NotJoined(_) => ErrorCode::NotJoined,
            SessionError::NotLinked(_) => ErrorCode::NotLinked,
            SessionError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            SessionError::InsufficientPlayers { .. } => ErrorCode::InsufficientPlayers,
            SessionError::UnresolvedProfile { .. } => ErrorCode::UnresolvedProfile,
            SessionError::InvalidSwapSelection(_) => ErrorCode::InvalidSwapSelection,
            SessionError::EloFetchFailed(_) => ErrorCode::EloFetchFailed,
            SessionError::Store(_) => ErrorCode::StoreError,
        }
    }

    /// Transient rejections the caller may simply retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SessionError::Busy | SessionError::Full { .. } | SessionError::AlreadyOpen(_)
        )
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(channel_id) => {
                format!("No open session in channel {}", channel_id)
            }
            SessionError::AlreadyOpen(channel_id) => {
                format!("Channel {} already has an open session", channel_id)
            }
            SessionError::Busy => "Session is busy fetching ratings, try again".to_string(),
            SessionError::Full { capacity } => {
                format!("Session is full ({} players)", capacity)
            }
            SessionError::AlreadyJoined(user_id) => {
                format!("User {} has already joined", user_id)
            }
            SessionError::NotJoined(user_id) => {
                format!("User {} is not a participant", user_id)
            }
            SessionError::NotLinked(user_id) => {
                format!("User {} has no linked FACEIT account", user_id)
            }
            SessionError::InvalidTransition { phase, action } => {
                format!("Cannot {} while session is {}", action, phase)
            }
            SessionError::InsufficientPlayers { have, need } => {
                format!("Need exactly {} players to balance, have {}", need, have)
            }
            SessionError::UnresolvedProfile { user_id } => {
                format!("Participant {} has no rating", user_id)
            }
            SessionError::InvalidSwapSelection(reason) => {
                format!("Invalid swap selection: {}", reason)
            }
            SessionError::EloFetchFailed(message) => {
                format!("Rating fetch failed: {}", message)
            }
            SessionError::Store(message) => format!("Link store error: {}", message),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<RosterError> for SessionError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::InsufficientPlayers { have, need } => {
                SessionError::InsufficientPlayers { have, need }
            }
            RosterError::UnresolvedProfile { user_id } => {
                SessionError::UnresolvedProfile { user_id }
            }
            RosterError::InvalidSwapSelection(reason) => {
                SessionError::InvalidSwapSelection(reason)
            }
        }
    }
}
