//! Jury seat rules and round-completion detection.
//!
//! Seats are unique per (thesis, phase, role) except `ALTERNATE`, which is
//! unlimited and does not count toward completion. A user may hold at most
//! one active seat per phase, and never while being an author or advisor of
//! the same thesis.

use crate::entities::{JuryEvaluation, JuryMember};
use crate::enums::{JuryRole, Phase};
use crate::errors::CoreError;

/// Seats whose evaluations complete a round.
pub const REQUIRED_SEATS: [JuryRole; 3] = [JuryRole::President, JuryRole::Vocal, JuryRole::Secretary];

/// Seats that must be filled before a final report may be submitted.
pub const FULL_BENCH: [JuryRole; 4] = [
    JuryRole::President,
    JuryRole::Vocal,
    JuryRole::Secretary,
    JuryRole::Alternate,
];

/// Active seats for `phase`.
pub fn active_seats(seats: &[JuryMember], phase: Phase) -> impl Iterator<Item = &JuryMember> {
    seats.iter().filter(move |s| s.is_active && s.phase == phase)
}

/// First active holder of `role` in `phase`.
#[must_use]
pub fn seat_holder(seats: &[JuryMember], phase: Phase, role: JuryRole) -> Option<&JuryMember> {
    active_seats(seats, phase).find(|s| s.role == role)
}

/// Roles from `roles` with no active holder in `phase`.
#[must_use]
pub fn vacant_roles(seats: &[JuryMember], phase: Phase, roles: &[JuryRole]) -> Vec<JuryRole> {
    roles
        .iter()
        .copied()
        .filter(|r| seat_holder(seats, phase, *r).is_none())
        .collect()
}

/// Check that `user_id` may take a `role` seat in `phase`.
///
/// `conflicted` is true when the candidate is an author or advisor of the
/// thesis.
///
/// # Errors
///
/// `CoreError::Conflict` when the candidate is conflicted, the required seat
/// is already taken, or the candidate already sits on this phase's jury.
pub fn check_assignment(
    seats: &[JuryMember],
    phase: Phase,
    role: JuryRole,
    user_id: &str,
    conflicted: bool,
) -> Result<(), CoreError> {
    if conflicted {
        return Err(CoreError::Conflict(format!(
            "user {user_id} is an author or advisor of this thesis"
        )));
    }
    if let Some(existing) = active_seats(seats, phase).find(|s| s.user_id == user_id) {
        return Err(CoreError::Conflict(format!(
            "user {user_id} already holds the {} seat for phase {phase}",
            existing.role
        )));
    }
    if role.is_required() {
        if let Some(holder) = seat_holder(seats, phase, role) {
            return Err(CoreError::Conflict(format!(
                "{role} seat for phase {phase} is already held by {}",
                holder.user_id
            )));
        }
    }
    Ok(())
}

#[must_use]
pub fn has_evaluated(evaluations: &[JuryEvaluation], jury_member_id: &str, round: u32) -> bool {
    evaluations
        .iter()
        .any(|e| e.jury_member_id == jury_member_id && e.round == round)
}

/// Required active seats of `phase` that have not evaluated `round` yet.
#[must_use]
pub fn pending_seats<'a>(
    seats: &'a [JuryMember],
    evaluations: &[JuryEvaluation],
    phase: Phase,
    round: u32,
) -> Vec<&'a JuryMember> {
    active_seats(seats, phase)
        .filter(|s| s.role.is_required())
        .filter(|s| !has_evaluated(evaluations, &s.id, round))
        .collect()
}

/// A round is complete when every required role is seated and every required
/// active seat has an evaluation for `round`. Alternates never block.
#[must_use]
pub fn is_round_complete(
    seats: &[JuryMember],
    evaluations: &[JuryEvaluation],
    phase: Phase,
    round: u32,
) -> bool {
    vacant_roles(seats, phase, &REQUIRED_SEATS).is_empty()
        && pending_seats(seats, evaluations, phase, round).is_empty()
}
