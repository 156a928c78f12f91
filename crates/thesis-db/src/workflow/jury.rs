//! Jury seating and the start of the project evaluation.

use chrono::Utc;
use thesis_core::entities::{JuryMember, Thesis};
use thesis_core::enums::{HistoryAction, JuryRole, Phase, ThesisStatus, TransitionKind};
use thesis_core::identity::Principal;
use thesis_core::ids::PREFIX_JURY;
use thesis_core::notify::{Audience, Notification, NotificationKind};
use thesis_core::roster;
use thesis_core::stage::Stage;
use tracing::info;

use crate::error::WorkflowError;
use crate::helpers::generate_id;
use crate::repos::jury::{deactivate_member, fetch_member, insert_member};
use crate::repos::snapshot::load_snapshot;
use crate::service::ThesisService;
use crate::updates::ThesisUpdateBuilder;

use super::{commit_change, jurors, link, require_checklist, require_live, require_status};

/// Phase whose jury may be seated in the thesis' current status.
fn seating_phase(thesis: &Thesis, operation: &str) -> Result<Phase, WorkflowError> {
    require_live(thesis)?;
    match thesis.stage() {
        Stage::JurySeating(phase) => Ok(phase),
        _ => Err(WorkflowError::InvalidState(format!(
            "{operation} requires status ASSIGNING_JURY or FINAL_REPORT; thesis {} is {}",
            thesis.id, thesis.status
        ))),
    }
}

impl ThesisService {
    /// Seat `user_id` as `role` on the jury of the phase being seated.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside a seating status; `Conflict` when the user is
    /// an author or advisor, already sits on this phase, or the required
    /// role is taken.
    pub async fn assign_jury_member(
        &self,
        thesis_id: &str,
        user_id: &str,
        role: JuryRole,
        actor: &Principal,
    ) -> Result<JuryMember, WorkflowError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(WorkflowError::Validation("user id must not be empty".into()));
        }

        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            let phase = seating_phase(&snapshot.thesis, "assign jury member")?;
            roster::check_assignment(
                &snapshot.jury,
                phase,
                role,
                user_id,
                snapshot.is_author_or_advisor(user_id),
            )?;

            let member = JuryMember {
                id: generate_id(&tx, PREFIX_JURY).await?,
                thesis_id: thesis_id.to_string(),
                user_id: user_id.to_string(),
                phase,
                role,
                is_active: true,
                assigned_at: Utc::now(),
            };
            insert_member(&tx, &member).await?;
            info!(thesis = %thesis_id, seat = %member.id, user = %user_id, %role, %phase, actor = %actor.id, "jury seat assigned");

            let note = Notification::new(
                Audience::Users(vec![user_id.to_string()]),
                NotificationKind::JuryAssigned,
                "Jury assignment",
                format!(
                    "You were appointed {role} for the {phase} of \"{}\"",
                    snapshot.thesis.title
                ),
            )
            .with_link(link(thesis_id));
            Ok((member, vec![note]))
        }
        .await;
        let (member, notes) = Self::finish(tx, result).await?;
        self.dispatch(&notes);
        Ok(member)
    }

    /// Deactivate a seat while the jury is still being seated. The row is
    /// kept; its evaluations stay on record.
    ///
    /// # Errors
    ///
    /// `NotFound` if the seat is not on this thesis; `InvalidState` outside
    /// a seating status or if the seat is already inactive.
    pub async fn remove_jury_member(
        &self,
        thesis_id: &str,
        jury_member_id: &str,
        actor: &Principal,
    ) -> Result<JuryMember, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            seating_phase(&snapshot.thesis, "remove jury member")?;
            let member = fetch_member(&tx, jury_member_id).await?;
            if member.thesis_id != thesis_id {
                return Err(WorkflowError::not_found("jury seat", jury_member_id));
            }
            if !member.is_active {
                return Err(WorkflowError::InvalidState(format!(
                    "jury seat {jury_member_id} is already inactive"
                )));
            }
            deactivate_member(&tx, jury_member_id).await?;
            info!(thesis = %thesis_id, seat = %jury_member_id, actor = %actor.id, "jury seat removed");
            Ok(JuryMember {
                is_active: false,
                ..member
            })
        }
        .await;
        Self::finish(tx, result).await
    }

    /// `ASSIGNING_JURY` → `EVALUATING_JURY` once the required seats are
    /// filled. Sets the evaluation deadline.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside `ASSIGNING_JURY`; `RequirementsNotMet` while a
    /// required seat is vacant.
    pub async fn start_jury_evaluation(&self, thesis_id: &str, actor: &Principal) -> Result<Thesis, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_status(&snapshot.thesis, &[ThesisStatus::AssigningJury], "start jury evaluation")?;
            require_checklist(TransitionKind::StartEvaluation, &snapshot)?;

            let now = Utc::now();
            let deadline = self.evaluation_deadline(now)?;
            let update = ThesisUpdateBuilder::new()
                .status(ThesisStatus::EvaluatingJury)
                .evaluation_deadline(Some(deadline))
                .build();
            let thesis = commit_change(&tx, &snapshot.thesis, &update, HistoryAction::Transition, None, actor, now).await?;

            let note = Notification::new(
                jurors(&snapshot, snapshot.active_phase()),
                NotificationKind::EvaluationRequested,
                "Evaluation requested",
                format!(
                    "Please evaluate \"{}\" by {}",
                    thesis.title,
                    deadline.format("%Y-%m-%d")
                ),
            )
            .with_link(link(&thesis.id));
            Ok((thesis, vec![note]))
        }
        .await;
        let (thesis, notes) = Self::finish(tx, result).await?;
        self.dispatch(&notes);
        Ok(thesis)
    }
}
