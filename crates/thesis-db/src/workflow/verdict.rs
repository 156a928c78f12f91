//! Consolidated jury verdict and resubmission after a jury observation.

use chrono::Utc;
use thesis_core::entities::Thesis;
use thesis_core::enums::{DocumentType, EvaluationResult, HistoryAction, TransitionKind};
use thesis_core::identity::Principal;
use thesis_core::notify::{Notification, NotificationKind};
use thesis_core::responses::VerdictOutcome;
use thesis_core::roster;
use thesis_core::stage::Stage;
use tracing::debug;

use crate::error::WorkflowError;
use crate::repos::documents::retire_current;
use crate::repos::snapshot::load_snapshot;
use crate::service::ThesisService;
use crate::updates::ThesisUpdateBuilder;

use super::{commit_change, jurors, link, require_checklist, require_live, students_and_advisors};

impl ThesisService {
    /// Close the current round once it is complete and the dictamen is
    /// uploaded.
    ///
    /// The verdict is `OBSERVED` if any required active seat observed this
    /// round, otherwise `APPROVED`. The thesis moves to the observed or
    /// approved status of its phase and the evaluation deadline is cleared.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside an evaluating status; `RequirementsNotMet`
    /// while the round is incomplete or the dictamen is missing.
    pub async fn issue_verdict(
        &self,
        thesis_id: &str,
        comment: Option<&str>,
        actor: &Principal,
    ) -> Result<VerdictOutcome, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_live(&snapshot.thesis)?;
            let Stage::JuryEvaluating(phase) = snapshot.thesis.stage() else {
                return Err(WorkflowError::InvalidState(format!(
                    "issue verdict requires status EVALUATING_JURY or EVALUATING_REPORT; thesis {thesis_id} is {}",
                    snapshot.thesis.status
                )));
            };
            require_checklist(TransitionKind::Verdict, &snapshot)?;

            let round = snapshot.thesis.current_round;
            let observed = roster::active_seats(&snapshot.jury, phase)
                .filter(|s| s.role.is_required())
                .any(|s| {
                    snapshot.evaluations.iter().any(|e| {
                        e.jury_member_id == s.id
                            && e.round == round
                            && e.result == EvaluationResult::Observed
                    })
                });
            let (verdict, next) = if observed {
                (EvaluationResult::Observed, Stage::JuryObserved(phase))
            } else {
                (EvaluationResult::Approved, Stage::PhaseApproved(phase))
            };

            let update = ThesisUpdateBuilder::new()
                .status(next.status())
                .evaluation_deadline(None)
                .build();
            let thesis = commit_change(
                &tx,
                &snapshot.thesis,
                &update,
                HistoryAction::Transition,
                comment,
                actor,
                Utc::now(),
            )
            .await?;

            let note = Notification::new(
                students_and_advisors(&snapshot),
                NotificationKind::VerdictIssued,
                format!("Jury verdict: {verdict}"),
                format!("The {phase} of \"{}\" was {verdict} in round {round}", thesis.title),
            )
            .with_link(link(&thesis.id));
            Ok((VerdictOutcome { thesis, verdict }, vec![note]))
        }
        .await;
        let (outcome, notes) = Self::finish(tx, result).await?;
        self.dispatch(&notes);
        Ok(outcome)
    }

    /// Send a revised manuscript back to the jury for a new round.
    ///
    /// Requires a current manuscript uploaded after the observation. Opens
    /// round `n + 1`, sets a fresh evaluation deadline and retires the
    /// previous dictamen.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside `JURY_OBSERVED`/`REPORT_OBSERVED`;
    /// `RequirementsNotMet` when the manuscript is missing or stale.
    pub async fn resubmit_after_observation(
        &self,
        thesis_id: &str,
        comment: Option<&str>,
        actor: &Principal,
    ) -> Result<Thesis, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_live(&snapshot.thesis)?;
            let Stage::JuryObserved(phase) = snapshot.thesis.stage() else {
                return Err(WorkflowError::InvalidState(format!(
                    "resubmit after observation requires status JURY_OBSERVED or REPORT_OBSERVED; thesis {thesis_id} is {}",
                    snapshot.thesis.status
                )));
            };
            require_checklist(TransitionKind::Resubmission, &snapshot)?;

            let now = Utc::now();
            let retired = retire_current(&tx, thesis_id, DocumentType::Dictamen).await?;
            let deadline = self.evaluation_deadline(now)?;
            let update = ThesisUpdateBuilder::new()
                .status(Stage::JuryEvaluating(phase).status())
                .current_round(snapshot.thesis.current_round + 1)
                .evaluation_deadline(Some(deadline))
                .correction_deadline(None)
                .build();
            let thesis = commit_change(&tx, &snapshot.thesis, &update, HistoryAction::Transition, comment, actor, now).await?;
            debug!(thesis = %thesis_id, retired, round = thesis.current_round, "dictamen retired for new round");

            let note = Notification::new(
                jurors(&snapshot, phase),
                NotificationKind::Resubmitted,
                "Revised manuscript submitted",
                format!(
                    "\"{}\" was revised; please evaluate round {}",
                    thesis.title, thesis.current_round
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

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use thesis_core::entities::{JuryMember, NewDocument};
    use thesis_core::enums::{Phase, ThesisStatus};

    use super::*;
    use crate::test_support::helpers::*;
    use crate::workflow::evaluation::EvaluationSubmission;

    #[tokio::test]
    async fn unanimous_approval_approves_the_project() {
        let (svc, _) = test_service().await;
        let thesis = project_approved(&svc).await;
        assert_eq!(thesis.status, ThesisStatus::ProjectApproved);
        assert!(thesis.evaluation_deadline.is_none());
    }

    #[tokio::test]
    async fn verdict_waits_for_round_and_dictamen() {
        let (svc, _) = test_service().await;
        let (thesis, seats) = evaluating_jury(&svc).await;

        let err = svc.issue_verdict(&thesis.id, None, &admin()).await.unwrap_err();
        let WorkflowError::RequirementsNotMet { checklist } = err else {
            panic!("expected RequirementsNotMet, got {err:?}");
        };
        assert_eq!(checklist.unmet_summary(), "round_complete, dictamen");

        evaluate_required(&svc, &thesis.id, &seats, EvaluationResult::Approved).await;
        let err = svc.issue_verdict(&thesis.id, None, &admin()).await.unwrap_err();
        let WorkflowError::RequirementsNotMet { checklist } = err else {
            panic!("expected RequirementsNotMet, got {err:?}");
        };
        assert_eq!(checklist.unmet_summary(), "dictamen");
    }

    #[tokio::test]
    async fn one_observation_observes_the_round() {
        let (svc, notifier) = test_service().await;
        let (thesis, seats) = evaluating_jury(&svc).await;
        for (i, seat) in seats.iter().filter(|s| s.role.is_required()).enumerate() {
            let submission = if i == 1 {
                EvaluationSubmission::observed("Weak methodology")
            } else {
                EvaluationSubmission::approved()
            };
            svc.submit_evaluation(&thesis.id, &seat.id, &submission, &admin())
                .await
                .unwrap();
        }
        upload_dictamen(&svc, &thesis.id).await;

        let outcome = svc
            .issue_verdict(&thesis.id, Some("See observations"), &admin())
            .await
            .unwrap();
        assert_eq!(outcome.verdict, EvaluationResult::Observed);
        assert_eq!(outcome.thesis.status, ThesisStatus::JuryObserved);
        assert!(outcome.thesis.evaluation_deadline.is_none());
        assert_eq!(notifier.sent().pop().unwrap().kind, NotificationKind::VerdictIssued);
    }

    #[tokio::test]
    async fn alternate_observation_does_not_count() {
        let (svc, _) = test_service().await;
        let (thesis, seats) = evaluating_jury(&svc).await;
        let alternate = seats.iter().find(|s| !s.role.is_required()).unwrap();
        svc.submit_evaluation(&thesis.id, &alternate.id, &EvaluationSubmission::observed("Nit"), &admin())
            .await
            .unwrap();
        evaluate_required(&svc, &thesis.id, &seats, EvaluationResult::Approved).await;
        upload_dictamen(&svc, &thesis.id).await;

        let outcome = svc.issue_verdict(&thesis.id, None, &admin()).await.unwrap();
        assert_eq!(outcome.verdict, EvaluationResult::Approved);
    }

    async fn jury_observed(svc: &ThesisService) -> (Thesis, Vec<JuryMember>) {
        let (thesis, seats) = evaluating_jury(svc).await;
        evaluate_required(svc, &thesis.id, &seats, EvaluationResult::Observed).await;
        upload_dictamen(svc, &thesis.id).await;
        let thesis = svc.issue_verdict(&thesis.id, None, &admin()).await.unwrap().thesis;
        (thesis, seats)
    }

    #[tokio::test]
    async fn stale_manuscript_is_rejected() {
        let (svc, _) = test_service().await;
        let (thesis, _) = jury_observed(&svc).await;
        assert_eq!(thesis.status, ThesisStatus::JuryObserved);

        let err = svc
            .resubmit_after_observation(&thesis.id, None, &student())
            .await
            .unwrap_err();
        let WorkflowError::RequirementsNotMet { checklist } = err else {
            panic!("expected RequirementsNotMet, got {err:?}");
        };
        assert!(checklist.item("revised_document").unwrap().detail.contains("predates"));
        assert_eq!(svc.get_thesis(&thesis.id).await.unwrap().current_round, 1);
    }

    #[tokio::test]
    async fn resubmission_opens_next_round() {
        let (svc, _) = test_service().await;
        let (thesis, seats) = jury_observed(&svc).await;
        svc.attach_document(&thesis.id, &NewDocument::new(DocumentType::ProjectFile, "project-v2.pdf"))
            .await
            .unwrap();

        let resubmitted = svc
            .resubmit_after_observation(&thesis.id, Some("Addressed all points"), &student())
            .await
            .unwrap();
        assert_eq!(resubmitted.status, ThesisStatus::EvaluatingJury);
        assert_eq!(resubmitted.current_round, 2);
        assert!(resubmitted.evaluation_deadline.is_some());

        let current = svc.list_documents(&thesis.id, true).await.unwrap();
        assert!(current.iter().all(|d| d.doc_type != DocumentType::Dictamen));

        // Round 1 evaluations do not complete round 2.
        assert!(!svc.is_round_complete(&thesis.id, Phase::Project, 2).await.unwrap());
        evaluate_required(&svc, &thesis.id, &seats, EvaluationResult::Approved).await;
        upload_dictamen(&svc, &thesis.id).await;
        let outcome = svc.issue_verdict(&thesis.id, None, &admin()).await.unwrap();
        assert_eq!(outcome.thesis.status, ThesisStatus::ProjectApproved);
        assert_eq!(outcome.thesis.current_round, 2);
    }
}
