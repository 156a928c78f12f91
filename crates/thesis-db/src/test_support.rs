//! Shared fixtures for thesis-db unit tests.
//!
//! Each fixture drives a fresh thesis through the real service operations up
//! to a given status.

pub(crate) mod helpers {
    use std::sync::Arc;

    use thesis_config::WorkflowConfig;
    use thesis_core::entities::{JuryMember, NewDocument, Thesis};
    use thesis_core::enums::{AdvisorType, DocumentType, EvaluationResult, JuryRole, SignatureStatus};
    use thesis_core::identity::Principal;

    use crate::ThesisDb;
    use crate::notify::RecordingNotifier;
    use crate::service::ThesisService;
    use crate::workflow::evaluation::EvaluationSubmission;

    pub const STUDENT: &str = "usr-student";
    pub const ADVISOR: &str = "usr-advisor";
    pub const PROJECT_JURY: [(&str, JuryRole); 4] = [
        ("usr-j1", JuryRole::President),
        ("usr-j2", JuryRole::Vocal),
        ("usr-j3", JuryRole::Secretary),
        ("usr-j4", JuryRole::Alternate),
    ];
    pub const REPORT_JURY: [(&str, JuryRole); 4] = [
        ("usr-f1", JuryRole::President),
        ("usr-f2", JuryRole::Vocal),
        ("usr-f3", JuryRole::Secretary),
        ("usr-f4", JuryRole::Alternate),
    ];

    /// In-memory service whose notifications are recorded.
    pub async fn test_service() -> (ThesisService, Arc<RecordingNotifier>) {
        let db = ThesisDb::open_local(":memory:").await.unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let svc = ThesisService::from_db(db, WorkflowConfig::default(), notifier.clone());
        (svc, notifier)
    }

    pub fn student() -> Principal {
        Principal::new(STUDENT, ["student"])
    }

    pub fn clerk() -> Principal {
        Principal::new("usr-clerk", ["reviewer"])
    }

    pub fn admin() -> Principal {
        Principal::new("usr-admin", ["admin"])
    }

    pub async fn new_thesis(svc: &ThesisService) -> Thesis {
        svc.create_thesis(
            "Low-cost seismic sensing for adobe housing",
            Some("MEMS accelerometers in rural housing"),
            &["seismic".to_string()],
            STUDENT,
            &student(),
        )
        .await
        .unwrap()
    }

    /// Draft with an accepted advisor and every submission document.
    pub async fn ready_for_submission(svc: &ThesisService) -> Thesis {
        let thesis = new_thesis(svc).await;
        svc.add_advisor(&thesis.id, ADVISOR, AdvisorType::Principal)
            .await
            .unwrap();
        svc.respond_advisor(&thesis.id, ADVISOR, true).await.unwrap();
        for doc in [
            NewDocument::new(DocumentType::ProjectFile, "project.pdf"),
            NewDocument::new(DocumentType::AdvisorLetter, "letter.pdf")
                .owned_by(ADVISOR)
                .signed(SignatureStatus::Signed),
            NewDocument::new(DocumentType::PaymentVoucher, "voucher.pdf"),
            NewDocument::new(DocumentType::AuthorSupport, "support.pdf").owned_by(STUDENT),
        ] {
            svc.attach_document(&thesis.id, &doc).await.unwrap();
        }
        thesis
    }

    pub async fn in_review(svc: &ThesisService) -> Thesis {
        let thesis = ready_for_submission(svc).await;
        svc.submit_for_review(&thesis.id, &student()).await.unwrap()
    }

    pub async fn assigning_jury(svc: &ThesisService) -> Thesis {
        let thesis = in_review(svc).await;
        svc.review_decision(&thesis.id, true, None, &clerk())
            .await
            .unwrap()
    }

    pub async fn seat(
        svc: &ThesisService,
        thesis_id: &str,
        bench: &[(&str, JuryRole)],
    ) -> Vec<JuryMember> {
        let mut seats = Vec::new();
        for (user, role) in bench {
            seats.push(
                svc.assign_jury_member(thesis_id, user, *role, &admin())
                    .await
                    .unwrap(),
            );
        }
        seats
    }

    /// `EVALUATING_JURY` with a full project bench (alternate last).
    pub async fn evaluating_jury(svc: &ThesisService) -> (Thesis, Vec<JuryMember>) {
        let thesis = assigning_jury(svc).await;
        let seats = seat(svc, &thesis.id, &PROJECT_JURY).await;
        let thesis = svc
            .start_jury_evaluation(&thesis.id, &admin())
            .await
            .unwrap();
        (thesis, seats)
    }

    /// Submit an evaluation from every required seat in `seats`.
    pub async fn evaluate_required(
        svc: &ThesisService,
        thesis_id: &str,
        seats: &[JuryMember],
        result: EvaluationResult,
    ) {
        for seat in seats.iter().filter(|s| s.role.is_required()) {
            let submission = match result {
                EvaluationResult::Approved => EvaluationSubmission::approved(),
                EvaluationResult::Observed => EvaluationSubmission::observed("Revise chapter 3"),
            };
            svc.submit_evaluation(thesis_id, &seat.id, &submission, &Principal::new(&seat.user_id, ["jury"]))
                .await
                .unwrap();
        }
    }

    pub async fn upload_dictamen(svc: &ThesisService, thesis_id: &str) {
        svc.attach_document(thesis_id, &NewDocument::new(DocumentType::Dictamen, "dictamen.pdf"))
            .await
            .unwrap();
    }

    pub async fn project_approved(svc: &ThesisService) -> Thesis {
        let (thesis, seats) = evaluating_jury(svc).await;
        evaluate_required(svc, &thesis.id, &seats, EvaluationResult::Approved).await;
        upload_dictamen(svc, &thesis.id).await;
        svc.issue_verdict(&thesis.id, None, &admin())
            .await
            .unwrap()
            .thesis
    }

    /// `FINAL_REPORT` with every final-report requirement satisfied.
    pub async fn final_report_ready(svc: &ThesisService) -> (Thesis, Vec<JuryMember>) {
        let thesis = project_approved(svc).await;
        svc.start_final_report(&thesis.id, &student()).await.unwrap();
        let seats = seat(svc, &thesis.id, &REPORT_JURY).await;
        for doc_type in [
            DocumentType::FinalReportFile,
            DocumentType::FinalReportVoucher,
            DocumentType::SimilarityReport,
            DocumentType::VerificationAct,
            DocumentType::ApprovalResolution,
        ] {
            svc.attach_document(&thesis.id, &NewDocument::new(doc_type, "report-doc.pdf"))
                .await
                .unwrap();
        }
        let thesis = svc.confirm_voucher_handoff(&thesis.id).await.unwrap();
        (thesis, seats)
    }

    /// `APPROVED`, ready for a defense.
    pub async fn approved(svc: &ThesisService) -> Thesis {
        let (thesis, seats) = final_report_ready(svc).await;
        svc.submit_final_report(&thesis.id, &student()).await.unwrap();
        evaluate_required(svc, &thesis.id, &seats, EvaluationResult::Approved).await;
        upload_dictamen(svc, &thesis.id).await;
        svc.issue_verdict(&thesis.id, None, &admin())
            .await
            .unwrap()
            .thesis
    }
}
