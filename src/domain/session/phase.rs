//! SessionPhase enum for tracking the lifecycle of a balancing session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of a balancing session.
///
/// `Starting` is the transient busy phase entered while the rating
/// batch fetch is outstanding. `Finalized` and `Cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Gathering,
    Starting,
    Active,
    Finalized,
    Cancelled,
}

impl SessionPhase {
    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Finalized | SessionPhase::Cancelled)
    }

    /// Returns true while the rating fetch is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionPhase::Starting)
    }

    /// Validates a transition from this phase to another.
    ///
    /// Valid transitions:
    /// - Gathering -> Starting (rating fetch begins)
    /// - Starting -> Active (fetch and split succeeded)
    /// - Starting -> Gathering (fetch failed, roster kept)
    /// - Active -> Finalized
    /// - Gathering | Starting | Active -> Cancelled
    pub fn can_transition_to(&self, target: &SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, target),
            (Gathering, Starting)
                | (Starting, Active)
                | (Starting, Gathering)
                | (Active, Finalized)
                | (Gathering, Cancelled)
                | (Starting, Cancelled)
                | (Active, Cancelled)
        )
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionPhase::Gathering => "Gathering",
            SessionPhase::Starting => "Starting",
            SessionPhase::Active => "Active",
            SessionPhase::Finalized => "Finalized",
            SessionPhase::Cancelled => "Cancelled",
        };
        write!(f, "{}", s)
    }
}
