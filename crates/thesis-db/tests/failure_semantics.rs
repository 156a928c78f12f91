//! Atomicity, concurrency and error-category guarantees of the workflow
//! service.

use std::sync::Arc;

use chrono::Utc;
use pretty_assertions::assert_eq;

use thesis_config::WorkflowConfig;
use thesis_core::calendar::business_days_between;
use thesis_core::entities::{JuryMember, NewDocument, Thesis};
use thesis_core::enums::{
    AdvisorType, DocumentType, HistoryAction, JuryRole, Phase, SignatureStatus, ThesisStatus,
};
use thesis_core::identity::Principal;
use thesis_db::ThesisDb;
use thesis_db::error::WorkflowError;
use thesis_db::notify::RecordingNotifier;
use thesis_db::service::ThesisService;
use thesis_db::workflow::evaluation::EvaluationSubmission;

fn actor() -> Principal {
    Principal::new("usr-admin", ["admin"])
}

async fn service_with(notifier: Arc<RecordingNotifier>) -> ThesisService {
    let db = ThesisDb::open_local(":memory:").await.unwrap();
    ThesisService::from_db(db, WorkflowConfig::default(), notifier)
}

async fn service() -> ThesisService {
    service_with(Arc::new(RecordingNotifier::new())).await
}

/// Draft with everything for submission except what `skip` names.
async fn draft(svc: &ThesisService, skip: Option<DocumentType>) -> Thesis {
    let thesis = svc
        .create_thesis("Groundwater recharge models", None, &[], "usr-stu", &actor())
        .await
        .unwrap();
    svc.add_advisor(&thesis.id, "usr-adv", AdvisorType::Principal)
        .await
        .unwrap();
    svc.respond_advisor(&thesis.id, "usr-adv", true).await.unwrap();
    let docs = [
        NewDocument::new(DocumentType::ProjectFile, "p.pdf"),
        NewDocument::new(DocumentType::AdvisorLetter, "l.pdf")
            .owned_by("usr-adv")
            .signed(SignatureStatus::Signed),
        NewDocument::new(DocumentType::PaymentVoucher, "v.pdf"),
        NewDocument::new(DocumentType::AuthorSupport, "s.pdf").owned_by("usr-stu"),
    ];
    for doc in docs.iter().filter(|d| Some(d.doc_type) != skip) {
        svc.attach_document(&thesis.id, doc).await.unwrap();
    }
    thesis
}

async fn evaluating(svc: &ThesisService) -> (Thesis, Vec<JuryMember>) {
    let thesis = draft(svc, None).await;
    svc.submit_for_review(&thesis.id, &actor()).await.unwrap();
    svc.review_decision(&thesis.id, true, None, &actor()).await.unwrap();
    let mut seats = Vec::new();
    for (user, role) in [
        ("usr-j1", JuryRole::President),
        ("usr-j2", JuryRole::Vocal),
        ("usr-j3", JuryRole::Secretary),
        ("usr-j4", JuryRole::Alternate),
    ] {
        seats.push(svc.assign_jury_member(&thesis.id, user, role, &actor()).await.unwrap());
    }
    let thesis = svc.start_jury_evaluation(&thesis.id, &actor()).await.unwrap();
    (thesis, seats)
}

#[tokio::test]
async fn missing_advisor_letter_blocks_submission() {
    let svc = service().await;
    let thesis = draft(&svc, Some(DocumentType::AdvisorLetter)).await;

    let err = svc.submit_for_review(&thesis.id, &actor()).await.unwrap_err();
    let WorkflowError::RequirementsNotMet { checklist } = err else {
        panic!("expected RequirementsNotMet, got {err:?}");
    };
    assert!(!checklist.item("advisor_letter").unwrap().satisfied);
    assert!(checklist.item("project_document").unwrap().satisfied);
    assert!(checklist.item("payment_voucher").unwrap().satisfied);
    assert_eq!(checklist.unmet_summary(), "advisor_letter");

    let unchanged = svc.get_thesis(&thesis.id).await.unwrap();
    assert_eq!(unchanged.status, ThesisStatus::Draft);
    assert!(svc.history(&thesis.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_duplicate_evaluation_has_one_winner() {
    let svc = service().await;
    let (thesis, seats) = evaluating(&svc).await;
    let seat = &seats[0];
    let juror = Principal::new("usr-j1", ["jury"]);
    let approve = EvaluationSubmission::approved();
    let observe = EvaluationSubmission::observed("Different opinion");

    let (a, b) = tokio::join!(
        svc.submit_evaluation(&thesis.id, &seat.id, &approve, &juror),
        svc.submit_evaluation(&thesis.id, &seat.id, &observe, &juror),
    );
    let outcomes = [a.is_ok(), b.is_ok()];
    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
    let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(loser, WorkflowError::Conflict(_)), "{loser:?}");

    assert!(svc.has_evaluated(&seat.id, 1).await.unwrap());
    let stored = svc.evaluations_for(&thesis.id, Phase::Project, 1).await.unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn evaluation_deadline_is_fifteen_business_days() {
    let svc = service().await;
    let before = Utc::now();
    let (thesis, _) = evaluating(&svc).await;
    let deadline = thesis.evaluation_deadline.unwrap();

    assert_eq!(
        business_days_between(before.date_naive(), deadline.date_naive()),
        15
    );
}

#[tokio::test]
async fn failing_notifier_does_not_roll_back() {
    let svc = service_with(Arc::new(RecordingNotifier::failing())).await;
    let thesis = draft(&svc, None).await;

    let submitted = svc.submit_for_review(&thesis.id, &actor()).await.unwrap();
    assert_eq!(submitted.status, ThesisStatus::InReview);
    assert_eq!(svc.get_thesis(&thesis.id).await.unwrap().status, ThesisStatus::InReview);
    assert_eq!(svc.history(&thesis.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_transition_leaves_no_trace() {
    let svc = service().await;
    let (thesis, seats) = evaluating(&svc).await;
    // Round incomplete: only the president has evaluated.
    svc.submit_evaluation(&thesis.id, &seats[0].id, &EvaluationSubmission::approved(), &actor())
        .await
        .unwrap();
    svc.attach_document(&thesis.id, &NewDocument::new(DocumentType::Dictamen, "d.pdf"))
        .await
        .unwrap();
    let history_before = svc.history(&thesis.id).await.unwrap().len();

    let err = svc.issue_verdict(&thesis.id, None, &actor()).await.unwrap_err();
    assert!(matches!(err, WorkflowError::RequirementsNotMet { .. }));

    let after = svc.get_thesis(&thesis.id).await.unwrap();
    assert_eq!(after.status, ThesisStatus::EvaluatingJury);
    assert_eq!(after.evaluation_deadline, thesis.evaluation_deadline);
    assert_eq!(svc.history(&thesis.id).await.unwrap().len(), history_before);
}

#[tokio::test]
async fn failed_history_append_rolls_back_the_transition() {
    let notifier = Arc::new(RecordingNotifier::new());
    let svc = service_with(notifier.clone()).await;
    let thesis = draft(&svc, None).await;
    svc.db()
        .conn()
        .execute(
            "CREATE TRIGGER status_history_reject BEFORE INSERT ON status_history BEGIN
                 SELECT RAISE(ABORT, 'history unavailable');
             END",
            (),
        )
        .await
        .unwrap();
    let before = svc.get_thesis(&thesis.id).await.unwrap();
    let history_before = svc.history(&thesis.id).await.unwrap().len();
    let sent_before = notifier.sent().len();

    let err = svc.submit_for_review(&thesis.id, &actor()).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Database(_)), "got {err:?}");

    let after = svc.get_thesis(&thesis.id).await.unwrap();
    assert_eq!(after.status, ThesisStatus::Draft);
    assert_eq!(after, before);
    assert_eq!(svc.history(&thesis.id).await.unwrap().len(), history_before);
    assert_eq!(notifier.sent().len(), sent_before);
}

#[tokio::test]
async fn errors_keep_their_category() {
    let svc = service().await;

    let missing = svc.submit_for_review("ths-00000000", &actor()).await.unwrap_err();
    assert!(matches!(missing, WorkflowError::NotFound { .. }));

    let thesis = draft(&svc, None).await;
    let wrong_state = svc.start_final_report(&thesis.id, &actor()).await.unwrap_err();
    assert!(matches!(wrong_state, WorkflowError::InvalidState(_)));

    let taken = svc
        .add_advisor(&thesis.id, "usr-other", AdvisorType::Principal)
        .await
        .unwrap_err();
    assert!(matches!(taken, WorkflowError::Conflict(_)));
}

#[tokio::test]
async fn restore_then_override_is_logged_in_order() {
    let svc = service().await;
    let thesis = draft(&svc, None).await;
    svc.delete_thesis(&thesis.id, None, &actor()).await.unwrap();

    let blocked = svc
        .change_status(&thesis.id, ThesisStatus::Rejected, "plagiarism", &actor())
        .await
        .unwrap_err();
    assert!(matches!(blocked, WorkflowError::InvalidState(_)));

    svc.restore(&thesis.id, None, &actor()).await.unwrap();
    svc.change_status(&thesis.id, ThesisStatus::Rejected, "plagiarism", &actor())
        .await
        .unwrap();

    let history = svc.history(&thesis.id).await.unwrap();
    let tail: Vec<_> = history.iter().rev().take(2).map(|h| h.action).collect();
    assert_eq!(
        tail,
        vec![
            HistoryAction::Override,
            HistoryAction::Restore,
        ]
    );
}
