//! Symmetric member exchange between the two teams.

use crate::domain::foundation::UserId;
use crate::domain::player::Participant;

use super::{Assignment, RosterError, TeamLabel};

/// Exchanges selected members between the two sides of an assignment.
pub struct SwapCoordinator;

impl SwapCoordinator {
    /// Produces a new assignment with the selections exchanged.
    ///
    /// Both selections must be non-empty, equal in size, free of
    /// duplicates, and drawn from their own team in the current
    /// assignment. Each swapped-in member takes the exact roster slot
    /// of the member it replaces, so applying the mirrored swap
    /// restores the original assignment.
    pub fn swap(
        assignment: &Assignment,
        team_a_users: &[UserId],
        team_b_users: &[UserId],
    ) -> Result<Assignment, RosterError> {
        let a_sel = normalize_selection(team_a_users, TeamLabel::A)?;
        let b_sel = normalize_selection(team_b_users, TeamLabel::B)?;

        if a_sel.len() != b_sel.len() {
            return Err(RosterError::invalid_swap(format!(
                "selections must be the same size, got {} from team A and {} from team B",
                a_sel.len(),
                b_sel.len()
            )));
        }
        for user_id in &a_sel {
            if !assignment.team_a().contains(user_id) {
                return Err(RosterError::invalid_swap(format!(
                    "user {} is not on team A",
                    user_id
                )));
            }
        }
        for user_id in &b_sel {
            if !assignment.team_b().contains(user_id) {
                return Err(RosterError::invalid_swap(format!(
                    "user {} is not on team B",
                    user_id
                )));
            }
        }

        let mut members_a: Vec<Participant> = assignment.team_a().members().to_vec();
        let mut members_b: Vec<Participant> = assignment.team_b().members().to_vec();

        for (a_user, b_user) in a_sel.iter().zip(&b_sel) {
            let a_slot = members_a
                .iter()
                .position(|p| p.user_id() == a_user)
                .ok_or_else(|| {
                    RosterError::invalid_swap(format!("user {} is not on team A", a_user))
                })?;
            let b_slot = members_b
                .iter()
                .position(|p| p.user_id() == b_user)
                .ok_or_else(|| {
                    RosterError::invalid_swap(format!("user {} is not on team B", b_user))
                })?;
            std::mem::swap(&mut members_a[a_slot], &mut members_b[b_slot]);
        }

        Ok(Assignment::new(members_a, members_b))
    }
}

/// Sorts a selection for deterministic pairing and rejects empty or
/// duplicated input.
fn normalize_selection(users: &[UserId], label: TeamLabel) -> Result<Vec<UserId>, RosterError> {
    if users.is_empty() {
        return Err(RosterError::invalid_swap(format!(
            "team {} selection is empty",
            label
        )));
    }
    let mut sorted = users.to_vec();
    sorted.sort();
    sorted.dedup();
    if sorted.len() != users.len() {
        return Err(RosterError::invalid_swap(format!(
            "team {} selection contains duplicates",
            label
        )));
    }
    Ok(sorted)
}
