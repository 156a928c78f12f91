//! Administrative overrides: manual status moves, soft delete and restore.

use chrono::Utc;
use thesis_core::entities::Thesis;
use thesis_core::enums::{HistoryAction, ThesisStatus};
use thesis_core::identity::Principal;
use thesis_core::notify::{Notification, NotificationKind};
use thesis_core::stage::Stage;

use crate::error::WorkflowError;
use crate::repos::snapshot::load_snapshot;
use crate::repos::thesis::fetch_thesis;
use crate::service::ThesisService;
use crate::updates::ThesisUpdateBuilder;

use super::{commit_change, link, non_blank, require_live, students_and_advisors};

impl ThesisService {
    /// Move a live thesis to any other status, bypassing the workflow edges.
    ///
    /// The jury phase follows the new status when it is phase-scoped. An
    /// evaluating status keeps (or starts) an evaluation deadline; every
    /// other status clears it. The correction deadline is always cleared.
    ///
    /// # Errors
    ///
    /// `Validation` without a comment; `InvalidState` if the thesis is
    /// deleted or already in `new_status`.
    pub async fn change_status(
        &self,
        thesis_id: &str,
        new_status: ThesisStatus,
        comment: &str,
        actor: &Principal,
    ) -> Result<Thesis, WorkflowError> {
        let comment = non_blank(Some(comment))
            .ok_or_else(|| WorkflowError::Validation("a status override requires a comment".into()))?;

        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            let current = &snapshot.thesis;
            require_live(current)?;
            if current.status == new_status {
                return Err(WorkflowError::InvalidState(format!(
                    "thesis {thesis_id} is already {new_status}"
                )));
            }

            let now = Utc::now();
            let stage = Stage::from(new_status);
            let mut update = ThesisUpdateBuilder::new()
                .status(new_status)
                .correction_deadline(None);
            if let Some(phase) = stage.jury_phase() {
                update = update.current_phase(phase);
            }
            update = match stage {
                Stage::JuryEvaluating(_) => {
                    let deadline = match current.evaluation_deadline {
                        Some(deadline) => deadline,
                        None => self.evaluation_deadline(now)?,
                    };
                    update.evaluation_deadline(Some(deadline))
                }
                _ => update.evaluation_deadline(None),
            };
            let thesis = commit_change(
                &tx,
                current,
                &update.build(),
                HistoryAction::Override,
                Some(comment),
                actor,
                now,
            )
            .await?;

            let note = Notification::new(
                students_and_advisors(&snapshot),
                NotificationKind::StatusChanged,
                format!("Status changed to {new_status}"),
                format!("\"{}\" was moved to {new_status}: {comment}", thesis.title),
            )
            .with_link(link(&thesis.id));
            Ok((thesis, vec![note]))
        }
        .await;
        let (thesis, notes) = Self::finish(tx, result).await?;
        self.dispatch(&notes);
        Ok(thesis)
    }

    /// Soft-delete a thesis. Its status is kept; only `restore` undoes it.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the thesis is already deleted.
    pub async fn delete_thesis(
        &self,
        thesis_id: &str,
        comment: Option<&str>,
        actor: &Principal,
    ) -> Result<Thesis, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let current = fetch_thesis(&tx, thesis_id).await?;
            require_live(&current)?;
            let now = Utc::now();
            let update = ThesisUpdateBuilder::new().deleted_at(Some(now)).build();
            commit_change(&tx, &current, &update, HistoryAction::Delete, comment, actor, now).await
        }
        .await;
        Self::finish(tx, result).await
    }

    /// Clear the soft-delete marker without touching the status.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the thesis is not deleted.
    pub async fn restore(
        &self,
        thesis_id: &str,
        comment: Option<&str>,
        actor: &Principal,
    ) -> Result<Thesis, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let current = fetch_thesis(&tx, thesis_id).await?;
            if !current.is_deleted() {
                return Err(WorkflowError::InvalidState(format!(
                    "thesis {thesis_id} is not deleted"
                )));
            }
            let update = ThesisUpdateBuilder::new().deleted_at(None).build();
            commit_change(&tx, &current, &update, HistoryAction::Restore, comment, actor, Utc::now()).await
        }
        .await;
        Self::finish(tx, result).await
    }
}
