//! Greedy roster balancer.
//!
//! Splits a full roster into two equal teams so the total-ELO gap stays
//! small. The greedy pass over a rating-sorted roster bounds the gap by
//! the highest single rating in the input.

use crate::domain::foundation::{Elo, UserId};
use crate::domain::player::Participant;
use sha2::{Digest, Sha256};

use super::{Assignment, RosterError};

/// Deterministic two-team splitter for a fixed roster size.
#[derive(Debug, Clone, Copy)]
pub struct Balancer {
    team_size: usize,
}

impl Balancer {
    /// Creates a balancer producing two teams of `team_size` each.
    pub fn new(team_size: usize) -> Self {
        Self { team_size }
    }

    /// Number of participants a full roster requires.
    pub fn roster_size(&self) -> usize {
        self.team_size * 2
    }

    /// Splits the roster into two teams of equal size.
    ///
    /// Every participant must carry a rating snapshot. The result is a
    /// pure function of the participant set and the seed: input order
    /// never matters, and the same seed always reproduces the same
    /// split. Passing a different seed permutes only the ordering of
    /// equal-rated participants, which is what makes a reshuffle
    /// request produce a different but still-balanced split.
    pub fn balance(
        &self,
        participants: &[Participant],
        seed: Option<u64>,
    ) -> Result<Assignment, RosterError> {
        let need = self.roster_size();
        if participants.len() != need {
            return Err(RosterError::insufficient_players(participants.len(), need));
        }

        let mut rated: Vec<(Participant, Elo, Vec<u8>)> = Vec::with_capacity(need);
        for participant in participants {
            let elo = participant
                .elo()
                .ok_or_else(|| RosterError::unresolved_profile(participant.user_id().clone()))?;
            let key = tie_break_key(participant.user_id(), seed);
            rated.push((participant.clone(), elo, key));
        }

        // Highest rating first; equal ratings order by the stable
        // per-user key so identical inputs always split identically.
        rated.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.2.cmp(&b.2)));

        let cap = self.team_size;
        let mut team_a: Vec<Participant> = Vec::with_capacity(cap);
        let mut team_b: Vec<Participant> = Vec::with_capacity(cap);
        let mut total_a: u64 = 0;
        let mut total_b: u64 = 0;

        for (participant, elo, _) in rated {
            let prefer_a = if total_a != total_b {
                total_a < total_b
            } else if team_a.len() != team_b.len() {
                team_a.len() < team_b.len()
            } else {
                true
            };
            // A full team forfeits its claim regardless of totals.
            let pick_a = if team_a.len() == cap {
                false
            } else if team_b.len() == cap {
                true
            } else {
                prefer_a
            };

            if pick_a {
                total_a += u64::from(elo.points());
                team_a.push(participant);
            } else {
                total_b += u64::from(elo.points());
                team_b.push(participant);
            }
        }

        Ok(Assignment::new(team_a, team_b))
    }
}

/// Secondary sort key for equal-rated participants.
///
/// Without a seed the key is the user id itself. With a seed it is a
/// digest over seed and user id, which permutes the relative order of
/// equal-rated users while staying reproducible for that seed.
fn tie_break_key(user_id: &UserId, seed: Option<u64>) -> Vec<u8> {
    match seed {
        None => user_id.as_str().as_bytes().to_vec(),
        Some(seed) => {
            let mut hasher = Sha256::new();
            hasher.update(seed.to_be_bytes());
            hasher.update(user_id.as_str().as_bytes());
            hasher.finalize().to_vec()
        }
    }
}
