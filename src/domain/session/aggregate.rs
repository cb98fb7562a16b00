//! Session aggregate entity.
//!
//! A session is one balancing event's full mutable state, scoped to a
//! single originating channel. All mutation goes through the transition
//! methods below, which enforce the phase guards and bump the activity
//! clock. The aggregate performs no I/O; the rating batch fetch happens
//! in the application layer between `begin_balancing` and
//! `complete_balancing` while the session sits in the `Starting` phase.

use crate::domain::foundation::{ChannelId, SessionId, Timestamp, UserId};
use crate::domain::player::Participant;
use crate::domain::roster::{Assignment, Balancer, SwapCoordinator};
use serde::{Deserialize, Serialize};

use super::view::{AssignmentView, ParticipantView, SessionView};
use super::{SessionError, SessionPhase};

/// Session aggregate - one balancing event per channel.
///
/// # Invariants
///
/// - `participants` is unique by user id and never exceeds `capacity`
/// - `assignment` exists exactly from the first successful balance on,
///   and always partitions `participants`
/// - once the phase is terminal no transition succeeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Channel the session belongs to.
    channel_id: ChannelId,

    /// Required participant count (both teams together).
    capacity: usize,

    /// Current lifecycle phase.
    phase: SessionPhase,

    /// Joined participants in join order.
    participants: Vec<Participant>,

    /// Current two-team split, if one has been produced.
    assignment: Option<Assignment>,

    /// When the session was opened.
    created_at: Timestamp,

    /// When the last successful transition happened.
    last_activity_at: Timestamp,
}

impl Session {
    /// Opens a fresh session in the Gathering phase.
    pub fn new(channel_id: ChannelId, capacity: usize) -> Self {
        let now = Timestamp::now();
        Self {
            id: SessionId::new(),
            channel_id,
            capacity,
            phase: SessionPhase::Gathering,
            participants: Vec::new(),
            assignment: None,
            created_at: now,
            last_activity_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the owning channel.
    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Returns the required participant count.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the participants in join order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Returns the number of joined participants.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Returns the current assignment, if any.
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// Returns when the session was opened.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the last successful transition happened.
    pub fn last_activity_at(&self) -> &Timestamp {
        &self.last_activity_at
    }

    /// Whether the session has been idle for at least the given number
    /// of seconds.
    pub fn is_expired(&self, now: &Timestamp, idle_timeout_secs: u64) -> bool {
        now.duration_since(&self.last_activity_at).num_seconds() >= idle_timeout_secs as i64
    }

    /// Builds the render-agnostic snapshot returned to callers.
    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            channel_id: self.channel_id.to_string(),
            phase: self.phase,
            participants: self.participants.iter().map(ParticipantView::of).collect(),
            assignment: self.assignment.as_ref().map(AssignmentView::of),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Gathering transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a participant to the roster.
    ///
    /// # Errors
    ///
    /// - `Busy` while a rating fetch is in flight
    /// - `InvalidTransition` outside the Gathering phase
    /// - `AlreadyJoined` if the user is already on the roster
    /// - `Full` once the roster has reached capacity
    pub fn join(&mut self, participant: Participant) -> Result<(), SessionError> {
        self.ensure_gathering("join")?;
        if self
            .participants
            .iter()
            .any(|p| p.user_id() == participant.user_id())
        {
            return Err(SessionError::already_joined(participant.user_id().clone()));
        }
        if self.participants.len() >= self.capacity {
            return Err(SessionError::full(self.capacity));
        }

        self.participants.push(participant);
        self.touch();
        Ok(())
    }

    /// Removes a participant from the roster.
    ///
    /// # Errors
    ///
    /// - `Busy` / `InvalidTransition` outside the Gathering phase
    /// - `NotJoined` if the user is not on the roster
    pub fn leave(&mut self, user_id: &UserId) -> Result<(), SessionError> {
        self.ensure_gathering("leave")?;
        let index = self
            .participants
            .iter()
            .position(|p| p.user_id() == user_id)
            .ok_or_else(|| SessionError::not_joined(user_id.clone()))?;

        self.participants.remove(index);
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Balancing transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Enters the Starting phase and hands back the roster to fetch
    /// ratings for.
    ///
    /// The caller is expected to fetch a rating for every returned
    /// participant and then call either [`Session::complete_balancing`]
    /// or [`Session::fail_balancing`].
    ///
    /// # Errors
    ///
    /// - `Busy` / `InvalidTransition` outside the Gathering phase
    /// - `InsufficientPlayers` unless the roster is exactly full
    pub fn begin_balancing(&mut self) -> Result<Vec<Participant>, SessionError> {
        self.ensure_gathering("start balancing")?;
        if self.participants.len() != self.capacity {
            return Err(SessionError::InsufficientPlayers {
                have: self.participants.len(),
                need: self.capacity,
            });
        }

        self.phase = SessionPhase::Starting;
        self.touch();
        Ok(self.participants.clone())
    }

    /// Installs the fetched rating snapshot, runs the balancer, and
    /// activates the session.
    ///
    /// The snapshot replaces the roster wholesale so Rebalance and Swap
    /// keep operating on the ratings frozen here.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the session is Starting
    /// - balancer errors revert the session to Gathering
    pub fn complete_balancing(&mut self, rated: Vec<Participant>) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Starting {
            return Err(SessionError::invalid_transition(
                self.phase,
                "complete balancing",
            ));
        }

        match self.balancer().balance(&rated, None) {
            Ok(assignment) => {
                self.participants = rated;
                self.assignment = Some(assignment);
                self.phase = SessionPhase::Active;
                self.touch();
                Ok(())
            }
            Err(err) => {
                self.phase = SessionPhase::Gathering;
                self.touch();
                Err(err.into())
            }
        }
    }

    /// Reverts a failed rating fetch back to Gathering.
    ///
    /// No partial snapshot is kept; a retry re-fetches everyone fresh.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the session is Starting
    pub fn fail_balancing(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Starting {
            return Err(SessionError::invalid_transition(
                self.phase,
                "abort balancing",
            ));
        }

        self.phase = SessionPhase::Gathering;
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Active transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-splits the frozen rating snapshot with a fresh seed.
    ///
    /// No network fetch happens here; the ratings are the ones frozen
    /// at start time.
    ///
    /// # Errors
    ///
    /// - `Busy` / `InvalidTransition` outside the Active phase
    pub fn rebalance(&mut self, seed: u64) -> Result<(), SessionError> {
        self.ensure_active("rebalance")?;

        let assignment = self.balancer().balance(&self.participants, Some(seed))?;
        self.assignment = Some(assignment);
        self.touch();
        Ok(())
    }

    /// Exchanges the selected members between the two teams.
    ///
    /// # Errors
    ///
    /// - `Busy` / `InvalidTransition` outside the Active phase
    /// - `InvalidSwapSelection` on cardinality or membership violations
    pub fn swap(
        &mut self,
        team_a_users: &[UserId],
        team_b_users: &[UserId],
    ) -> Result<(), SessionError> {
        self.ensure_active("swap")?;
        let current = self
            .assignment
            .as_ref()
            .ok_or_else(|| SessionError::invalid_transition(self.phase, "swap"))?;

        let swapped = SwapCoordinator::swap(current, team_a_users, team_b_users)?;
        self.assignment = Some(swapped);
        self.touch();
        Ok(())
    }

    /// Locks the current assignment in and terminates the session.
    ///
    /// # Errors
    ///
    /// - `Busy` / `InvalidTransition` outside the Active phase
    pub fn finalize(&mut self) -> Result<(), SessionError> {
        self.ensure_active("finalize")?;
        self.phase = SessionPhase::Finalized;
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Terminal transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Cancels the session from any non-terminal phase.
    ///
    /// Cancelling while Starting is allowed; the in-flight fetch result
    /// is discarded when it lands.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the session is already terminal
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if self.phase.is_terminal() {
            return Err(SessionError::invalid_transition(self.phase, "cancel"));
        }

        self.phase = SessionPhase::Cancelled;
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_gathering(&self, action: &'static str) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Gathering => Ok(()),
            SessionPhase::Starting => Err(SessionError::busy()),
            phase => Err(SessionError::invalid_transition(phase, action)),
        }
    }

    fn ensure_active(&self, action: &'static str) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Active => Ok(()),
            SessionPhase::Starting => Err(SessionError::busy()),
            phase => Err(SessionError::invalid_transition(phase, action)),
        }
    }

    fn balancer(&self) -> Balancer {
        Balancer::new(self.capacity / 2)
    }

    fn touch(&mut self) {
        self.last_activity_at = Timestamp::now();
    }
}
