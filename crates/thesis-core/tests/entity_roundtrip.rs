//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use chrono::{TimeDelta, Utc};
use schemars::schema_for;
use thesis_core::checklist::{Checklist, Requirement};
use thesis_core::entities::*;
use thesis_core::enums::*;
use thesis_core::notify::{Audience, Notification, NotificationKind};
use thesis_core::responses::*;
use thesis_core::schedule::{ConflictKind, ConflictReport, ScheduleConflict};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_thesis() -> Thesis {
    let now = Utc::now();
    Thesis {
        id: "ths-a3f8b2c1".into(),
        title: "Low-cost seismic sensing for adobe housing".into(),
        abstract_text: Some("We evaluate MEMS accelerometers...".into()),
        keywords: vec!["seismic".into(), "adobe".into()],
        status: ThesisStatus::EvaluatingJury,
        current_round: 2,
        current_phase: Phase::Project,
        evaluation_deadline: Some(now + TimeDelta::days(21)),
        correction_deadline: None,
        defense_at: None,
        defense_venue: None,
        voucher_handoff_confirmed: false,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn sample_evaluation() -> JuryEvaluation {
    JuryEvaluation {
        id: "evl-00aa11bb".into(),
        thesis_id: "ths-a3f8b2c1".into(),
        jury_member_id: "jur-1234abcd".into(),
        phase: Phase::Project,
        round: 2,
        result: EvaluationResult::Observed,
        observation: Some("Methodology chapter lacks a control group".into()),
        document_id: None,
        created_at: Utc::now(),
    }
}

roundtrip_and_validate!(thesis_roundtrip, Thesis, sample_thesis());

roundtrip_and_validate!(
    history_roundtrip,
    StatusHistoryEntry,
    StatusHistoryEntry {
        id: "hst-9f8e7d6c".into(),
        thesis_id: "ths-a3f8b2c1".into(),
        action: HistoryAction::Override,
        previous_status: ThesisStatus::InReview,
        new_status: ThesisStatus::Archived,
        comment: Some("Student withdrew".into()),
        actor_id: "usr-admin".into(),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    jury_member_roundtrip,
    JuryMember,
    JuryMember {
        id: "jur-1234abcd".into(),
        thesis_id: "ths-a3f8b2c1".into(),
        user_id: "usr-prof-7".into(),
        phase: Phase::FinalReport,
        role: JuryRole::Secretary,
        is_active: true,
        assigned_at: Utc::now(),
    }
);

roundtrip_and_validate!(evaluation_roundtrip, JuryEvaluation, sample_evaluation());

roundtrip_and_validate!(
    document_roundtrip,
    DocumentDescriptor,
    DocumentDescriptor {
        id: "doc-5e6f7a8b".into(),
        thesis_id: "ths-a3f8b2c1".into(),
        doc_type: DocumentType::AdvisorLetter,
        owner_id: Some("usr-prof-1".into()),
        file_name: "carta-asesor.pdf".into(),
        is_current: true,
        signature: SignatureStatus::Registered,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    checklist_roundtrip,
    Checklist,
    Checklist {
        kind: TransitionKind::Submission,
        items: vec![Requirement {
            name: "advisor_letter".into(),
            satisfied: false,
            detail: "Principal advisor acceptance letter missing".into(),
        }],
    }
);

roundtrip_and_validate!(
    receipt_roundtrip,
    EvaluationReceipt,
    EvaluationReceipt {
        evaluation: sample_evaluation(),
        round_complete: true,
    }
);

roundtrip_and_validate!(
    defense_scheduled_roundtrip,
    DefenseScheduled,
    {
        let thesis = sample_thesis();
        let start = Utc::now();
        DefenseScheduled {
            report: ConflictReport {
                window_start: start,
                window_end: start + TimeDelta::hours(2),
                conflicts: vec![ScheduleConflict {
                    kind: ConflictKind::Venue,
                    thesis_id: "ths-other".into(),
                    title: "Other".into(),
                    start,
                    end: start + TimeDelta::hours(2),
                    venue: Some("Aula Magna".into()),
                    juror_id: None,
                }],
                same_day: vec![],
            },
            thesis,
        }
    }
);

roundtrip_and_validate!(
    notification_roundtrip,
    Notification,
    Notification::new(
        Audience::Role("reviewer".into()),
        NotificationKind::SubmittedForReview,
        "Thesis submitted",
        "A thesis is waiting for review",
    )
    .with_link("/theses/ths-a3f8b2c1")
);

#[test]
fn new_document_defaults_to_unsigned() {
    let doc: NewDocument =
        serde_json::from_str(r#"{"doc_type":"PROJECT_FILE","owner_id":null,"file_name":"p.pdf"}"#)
            .unwrap();
    assert_eq!(doc.signature, SignatureStatus::Unsigned);
}

#[test]
fn thesis_stage_follows_status() {
    let mut thesis = sample_thesis();
    assert_eq!(thesis.stage().jury_phase(), Some(Phase::Project));
    thesis.status = ThesisStatus::ReportObserved;
    assert_eq!(thesis.stage().jury_phase(), Some(Phase::FinalReport));
}
