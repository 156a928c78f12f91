//! Clerical review: submission, decision, and resubmission after a review
//! observation.

use chrono::Utc;
use thesis_core::entities::Thesis;
use thesis_core::enums::{HistoryAction, ThesisStatus, TransitionKind};
use thesis_core::identity::Principal;
use thesis_core::notify::{Audience, Notification, NotificationKind};

use crate::error::WorkflowError;
use crate::repos::snapshot::load_snapshot;
use crate::service::ThesisService;
use crate::updates::ThesisUpdateBuilder;

use super::{commit_change, link, non_blank, require_checklist, require_status, students_and_advisors};

impl ThesisService {
    /// `DRAFT` → `IN_REVIEW` once the submission checklist is satisfied.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside `DRAFT`; `RequirementsNotMet` with the full
    /// checklist when anything is missing.
    pub async fn submit_for_review(&self, thesis_id: &str, actor: &Principal) -> Result<Thesis, WorkflowError> {
        self.enter_review(thesis_id, ThesisStatus::Draft, "submit for review", actor)
            .await
    }

    /// `OBSERVED` → `IN_REVIEW` after the students address the review
    /// observation.
    ///
    /// # Errors
    ///
    /// Same as [`ThesisService::submit_for_review`], from `OBSERVED`.
    pub async fn resubmit_for_review(&self, thesis_id: &str, actor: &Principal) -> Result<Thesis, WorkflowError> {
        self.enter_review(thesis_id, ThesisStatus::Observed, "resubmit for review", actor)
            .await
    }

    async fn enter_review(
        &self,
        thesis_id: &str,
        from: ThesisStatus,
        operation: &str,
        actor: &Principal,
    ) -> Result<Thesis, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_status(&snapshot.thesis, &[from], operation)?;
            require_checklist(TransitionKind::Submission, &snapshot)?;

            let update = ThesisUpdateBuilder::new()
                .status(ThesisStatus::InReview)
                .correction_deadline(None)
                .build();
            let thesis = commit_change(
                &tx,
                &snapshot.thesis,
                &update,
                HistoryAction::Transition,
                None,
                actor,
                Utc::now(),
            )
            .await?;
            let note = Notification::new(
                Audience::Role(self.workflow().reviewer_role.clone()),
                NotificationKind::SubmittedForReview,
                "Thesis submitted for review",
                format!("\"{}\" is waiting for clerical review", thesis.title),
            )
            .with_link(link(&thesis.id));
            Ok((thesis, vec![note]))
        }
        .await;
        let (thesis, notes) = Self::finish(tx, result).await?;
        self.dispatch(&notes);
        Ok(thesis)
    }

    /// Decide a clerical review: approve to `ASSIGNING_JURY`, or observe back
    /// to `OBSERVED` with a mandatory comment.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside `IN_REVIEW`; `Validation` when observing
    /// without a comment.
    pub async fn review_decision(
        &self,
        thesis_id: &str,
        approve: bool,
        comment: Option<&str>,
        actor: &Principal,
    ) -> Result<Thesis, WorkflowError> {
        let comment = non_blank(comment);
        if !approve && comment.is_none() {
            return Err(WorkflowError::Validation(
                "observing a thesis requires a comment".into(),
            ));
        }

        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_status(&snapshot.thesis, &[ThesisStatus::InReview], "review decision")?;

            let next = if approve {
                ThesisStatus::AssigningJury
            } else {
                ThesisStatus::Observed
            };
            let update = ThesisUpdateBuilder::new().status(next).build();
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

            let (title, message) = if approve {
                ("Thesis approved by review", format!("\"{}\" passed clerical review", thesis.title))
            } else {
                (
                    "Thesis observed by review",
                    format!("\"{}\" needs corrections: {}", thesis.title, comment.unwrap_or_default()),
                )
            };
            let note = Notification::new(
                students_and_advisors(&snapshot),
                NotificationKind::ReviewDecided,
                title,
                message,
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
    use thesis_core::entities::NewDocument;
    use thesis_core::enums::DocumentType;
    use thesis_core::notify::{Audience, NotificationKind};

    use super::*;
    use crate::test_support::helpers::*;

    #[tokio::test]
    async fn submission_moves_to_review_and_notifies_reviewers() {
        let (svc, notifier) = test_service().await;
        let thesis = ready_for_submission(&svc).await;

        let submitted = svc.submit_for_review(&thesis.id, &student()).await.unwrap();
        assert_eq!(submitted.status, ThesisStatus::InReview);

        let history = svc.history(&thesis.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].previous_status, ThesisStatus::Draft);
        assert_eq!(history[0].new_status, ThesisStatus::InReview);
        assert_eq!(history[0].action, HistoryAction::Transition);
        assert_eq!(history[0].actor_id, STUDENT);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::SubmittedForReview);
        assert_eq!(sent[0].audience, Audience::Role("reviewer".into()));
    }

    #[tokio::test]
    async fn incomplete_submission_reports_checklist() {
        let (svc, notifier) = test_service().await;
        let thesis = new_thesis(&svc).await;

        let err = svc.submit_for_review(&thesis.id, &student()).await.unwrap_err();
        let WorkflowError::RequirementsNotMet { checklist } = err else {
            panic!("expected RequirementsNotMet, got {err:?}");
        };
        assert!(!checklist.item("project_document").unwrap().satisfied);
        assert!(!checklist.item("advisor_accepted").unwrap().satisfied);
        assert!(checklist.item(&format!("author_document:{STUDENT}")).is_some());

        assert_eq!(svc.get_thesis(&thesis.id).await.unwrap().status, ThesisStatus::Draft);
        assert!(svc.history(&thesis.id).await.unwrap().is_empty());
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn submit_twice_is_invalid_state() {
        let (svc, _) = test_service().await;
        let thesis = in_review(&svc).await;
        let err = svc.submit_for_review(&thesis.id, &student()).await.unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidState(_)));
    }

    #[tokio::test]
    async fn approval_moves_to_jury_assignment() {
        let (svc, notifier) = test_service().await;
        let thesis = assigning_jury(&svc).await;
        assert_eq!(thesis.status, ThesisStatus::AssigningJury);

        let last = notifier.sent().pop().unwrap();
        assert_eq!(last.kind, NotificationKind::ReviewDecided);
        let Audience::Users(users) = last.audience else {
            panic!("expected user audience");
        };
        assert_eq!(users, vec![STUDENT.to_string(), ADVISOR.to_string()]);
    }

    #[tokio::test]
    async fn observation_requires_comment() {
        let (svc, _) = test_service().await;
        let thesis = in_review(&svc).await;

        let err = svc
            .review_decision(&thesis.id, false, Some("  "), &clerk())
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));

        let observed = svc
            .review_decision(&thesis.id, false, Some("Missing bibliography"), &clerk())
            .await
            .unwrap();
        assert_eq!(observed.status, ThesisStatus::Observed);
        assert!(observed.correction_deadline.is_none());

        let history = svc.history(&thesis.id).await.unwrap();
        assert_eq!(history.last().unwrap().comment.as_deref(), Some("Missing bibliography"));
    }

    #[tokio::test]
    async fn observed_thesis_can_be_resubmitted() {
        let (svc, _) = test_service().await;
        let thesis = in_review(&svc).await;
        svc.review_decision(&thesis.id, false, Some("Fix format"), &clerk())
            .await
            .unwrap();
        svc.attach_document(&thesis.id, &NewDocument::new(DocumentType::ProjectFile, "project-v2.pdf"))
            .await
            .unwrap();

        let again = svc.resubmit_for_review(&thesis.id, &student()).await.unwrap();
        assert_eq!(again.status, ThesisStatus::InReview);
        assert!(again.correction_deadline.is_none());

        let statuses: Vec<ThesisStatus> = svc
            .history(&thesis.id)
            .await
            .unwrap()
            .iter()
            .map(|h| h.new_status)
            .collect();
        assert_eq!(
            statuses,
            vec![ThesisStatus::InReview, ThesisStatus::Observed, ThesisStatus::InReview]
        );
    }
}
