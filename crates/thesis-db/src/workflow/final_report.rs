//! Final-report phase: opening it and submitting the report to the jury.

use chrono::Utc;
use thesis_core::entities::Thesis;
use thesis_core::enums::{DocumentType, HistoryAction, Phase, ThesisStatus, TransitionKind};
use thesis_core::identity::Principal;
use thesis_core::notify::{Notification, NotificationKind};

use crate::error::WorkflowError;
use crate::repos::documents::retire_current;
use crate::repos::snapshot::load_snapshot;
use crate::service::ThesisService;
use crate::updates::ThesisUpdateBuilder;

use super::{commit_change, jurors, link, require_checklist, require_status};

impl ThesisService {
    /// `PROJECT_APPROVED` → `FINAL_REPORT`; the jury phase becomes
    /// `FINAL_REPORT`.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside `PROJECT_APPROVED`.
    pub async fn start_final_report(&self, thesis_id: &str, actor: &Principal) -> Result<Thesis, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_status(&snapshot.thesis, &[ThesisStatus::ProjectApproved], "start final report")?;
            let update = ThesisUpdateBuilder::new()
                .status(ThesisStatus::FinalReport)
                .current_phase(Phase::FinalReport)
                .build();
            commit_change(&tx, &snapshot.thesis, &update, HistoryAction::Transition, None, actor, Utc::now()).await
        }
        .await;
        Self::finish(tx, result).await
    }

    /// `FINAL_REPORT` → `EVALUATING_REPORT` once the report paperwork is
    /// complete and the full bench is seated. Starts round 1 of the phase.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside `FINAL_REPORT`; `RequirementsNotMet` listing
    /// every missing document, the voucher handoff and vacant seats.
    pub async fn submit_final_report(&self, thesis_id: &str, actor: &Principal) -> Result<Thesis, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_status(&snapshot.thesis, &[ThesisStatus::FinalReport], "submit final report")?;
            require_checklist(TransitionKind::FinalReport, &snapshot)?;

            let now = Utc::now();
            let deadline = self.evaluation_deadline(now)?;
            retire_current(&tx, thesis_id, DocumentType::Dictamen).await?;
            let update = ThesisUpdateBuilder::new()
                .status(ThesisStatus::EvaluatingReport)
                .current_phase(Phase::FinalReport)
                .current_round(1)
                .evaluation_deadline(Some(deadline))
                .build();
            let thesis = commit_change(&tx, &snapshot.thesis, &update, HistoryAction::Transition, None, actor, now).await?;

            let note = Notification::new(
                jurors(&snapshot, Phase::FinalReport),
                NotificationKind::FinalReportSubmitted,
                "Final report submitted",
                format!(
                    "Please evaluate the final report of \"{}\" by {}",
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
