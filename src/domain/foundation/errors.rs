//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Not found errors
    SessionNotFound,
    ProfileNotFound,
    NotLinked,

    // State errors
    SessionAlreadyOpen,
    SessionBusy,
    SessionFull,
    AlreadyJoined,
    NotJoined,
    InvalidTransition,
    InsufficientPlayers,
    UnresolvedProfile,
    InvalidSwapSelection,

    // Upstream errors
    EloFetchFailed,
    StatsUnavailable,
    UpstreamTimeout,

    // Infrastructure errors
    StoreError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::ProfileNotFound => "PROFILE_NOT_FOUND",
            ErrorCode::NotLinked => "NOT_LINKED",
            ErrorCode::SessionAlreadyOpen => "SESSION_ALREADY_OPEN",
            ErrorCode::SessionBusy => "SESSION_BUSY",
            ErrorCode::SessionFull => "SESSION_FULL",
            ErrorCode::AlreadyJoined => "ALREADY_JOINED",
            ErrorCode::NotJoined => "NOT_JOINED",
            ErrorCode::InvalidTransition => "INVALID_TRANSITION",
            ErrorCode::InsufficientPlayers => "INSUFFICIENT_PLAYERS",
            ErrorCode::UnresolvedProfile => "UNRESOLVED_PROFILE",
            ErrorCode::InvalidSwapSelection => "INVALID_SWAP_SELECTION",
            ErrorCode::EloFetchFailed => "ELO_FETCH_FAILED",
            ErrorCode::StatsUnavailable => "STATS_UNAVAILABLE",
            ErrorCode::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            ErrorCode::StoreError => "STORE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}
