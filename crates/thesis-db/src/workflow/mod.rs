//! Workflow operations of the thesis state machine.
//!
//! Each public operation takes the service lock, opens an `IMMEDIATE`
//! transaction, runs a `*_tx` body against the transaction, and commits or
//! rolls back via [`ThesisService::finish`]. Bodies return the notifications
//! to send; they are dispatched only after a successful commit.

pub mod admin;
pub mod defense;
pub mod evaluation;
pub mod final_report;
pub mod jury;
pub mod overdue;
pub mod review;
pub mod setup;
pub mod verdict;

use chrono::{DateTime, Utc};
use thesis_core::checklist::{self, Checklist};
use thesis_core::entities::{Thesis, ThesisSnapshot};
use thesis_core::enums::{HistoryAction, Phase, ThesisStatus, TransitionKind};
use thesis_core::identity::Principal;
use thesis_core::notify::Audience;
use thesis_core::roster;
use tracing::{debug, info};

use crate::error::WorkflowError;
use crate::repos::history::{HistoryEvent, append_history};
use crate::repos::snapshot::load_snapshot;
use crate::repos::thesis::{fetch_thesis, update_thesis};
use crate::service::ThesisService;
use crate::updates::ThesisUpdate;

/// Reject any write to a soft-deleted thesis.
pub(crate) fn require_live(thesis: &Thesis) -> Result<(), WorkflowError> {
    if thesis.is_deleted() {
        return Err(WorkflowError::InvalidState(format!(
            "thesis {} is deleted; restore it first",
            thesis.id
        )));
    }
    Ok(())
}

/// Require a live thesis whose status is one of `allowed`.
pub(crate) fn require_status(
    thesis: &Thesis,
    allowed: &[ThesisStatus],
    operation: &str,
) -> Result<(), WorkflowError> {
    require_live(thesis)?;
    if !allowed.contains(&thesis.status) {
        let expected: Vec<&str> = allowed.iter().map(|s| s.as_str()).collect();
        return Err(WorkflowError::InvalidState(format!(
            "{operation} requires status {}; thesis {} is {}",
            expected.join(" or "),
            thesis.id,
            thesis.status
        )));
    }
    Ok(())
}

/// Evaluate `kind` and fail with the full checklist if anything is unmet.
pub(crate) fn require_checklist(
    kind: TransitionKind,
    snapshot: &ThesisSnapshot,
) -> Result<Checklist, WorkflowError> {
    let checklist = checklist::evaluate(kind, snapshot);
    debug!(
        thesis = %snapshot.thesis.id,
        %kind,
        satisfied = checklist.is_satisfied(),
        unmet = %checklist.unmet_summary(),
        "checklist evaluated"
    );
    if checklist.is_satisfied() {
        Ok(checklist)
    } else {
        Err(WorkflowError::RequirementsNotMet { checklist })
    }
}

/// Trim optional free text; blank counts as absent.
pub(crate) fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Apply `update` to `current` and append the matching history entry.
/// Returns the reloaded thesis.
pub(crate) async fn commit_change(
    conn: &libsql::Connection,
    current: &Thesis,
    update: &ThesisUpdate,
    action: HistoryAction,
    comment: Option<&str>,
    actor: &Principal,
    now: DateTime<Utc>,
) -> Result<Thesis, WorkflowError> {
    update_thesis(conn, &current.id, current.status, update, now).await?;
    let new = update.status.unwrap_or(current.status);
    append_history(
        conn,
        &current.id,
        &HistoryEvent {
            action,
            previous: current.status,
            new,
            comment: non_blank(comment),
            actor_id: &actor.id,
        },
        now,
    )
    .await?;
    info!(thesis = %current.id, from = %current.status, to = %new, %action, actor = %actor.id, "thesis updated");
    fetch_thesis(conn, &current.id).await
}

/// Authors and active advisors.
pub(crate) fn students_and_advisors(snapshot: &ThesisSnapshot) -> Audience {
    let mut users: Vec<String> = snapshot.authors.iter().map(|a| a.user_id.clone()).collect();
    users.extend(
        snapshot
            .advisors
            .iter()
            .filter(|a| a.is_active)
            .map(|a| a.user_id.clone()),
    );
    Audience::Users(users)
}

/// Active jurors of `phase`.
pub(crate) fn jurors(snapshot: &ThesisSnapshot, phase: Phase) -> Audience {
    Audience::Users(
        roster::active_seats(&snapshot.jury, phase)
            .map(|s| s.user_id.clone())
            .collect(),
    )
}

pub(crate) fn link(thesis_id: &str) -> String {
    format!("/theses/{thesis_id}")
}

impl ThesisService {
    /// Evaluate a checklist without transitioning.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` if the thesis does not exist.
    pub async fn checklist(&self, thesis_id: &str, kind: TransitionKind) -> Result<Checklist, WorkflowError> {
        let _guard = self.guard().await;
        let snapshot = load_snapshot(self.db().conn(), thesis_id).await?;
        Ok(checklist::evaluate(kind, &snapshot))
    }
}
