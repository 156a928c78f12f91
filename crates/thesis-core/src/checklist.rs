//! Requirement checklists that gate workflow transitions.
//!
//! [`evaluate`] is a pure function of a [`ThesisSnapshot`] and a
//! [`TransitionKind`]. Every item is evaluated even after one fails so callers
//! can render a complete progress list; the transition is allowed only when
//! all items are satisfied.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Advisor, ThesisSnapshot};
use crate::enums::{AcceptanceState, DocumentType, JuryRole, Phase, TransitionKind};
use crate::roster;
use crate::stage::Stage;

/// One named requirement and whether the snapshot satisfies it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub satisfied: bool,
    pub detail: String,
}

impl Requirement {
    fn new(name: impl Into<String>, satisfied: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            satisfied,
            detail: detail.into(),
        }
    }
}

/// Ordered checklist for one transition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Checklist {
    pub kind: TransitionKind,
    pub items: Vec<Requirement>,
}

impl Checklist {
    /// Logical AND of every item.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.items.iter().all(|i| i.satisfied)
    }

    pub fn unmet(&self) -> impl Iterator<Item = &Requirement> {
        self.items.iter().filter(|i| !i.satisfied)
    }

    #[must_use]
    pub fn item(&self, name: &str) -> Option<&Requirement> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Comma-separated names of unmet items, for log lines and error text.
    #[must_use]
    pub fn unmet_summary(&self) -> String {
        self.unmet()
            .map(|i| i.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Evaluate the checklist for `kind` against `snapshot`.
#[must_use]
pub fn evaluate(kind: TransitionKind, snapshot: &ThesisSnapshot) -> Checklist {
    let mut items = Vec::new();
    match kind {
        TransitionKind::Submission => submission(snapshot, &mut items),
        TransitionKind::StartEvaluation => {
            seats(snapshot, snapshot.active_phase(), &roster::REQUIRED_SEATS, &mut items);
        }
        TransitionKind::Verdict => verdict(snapshot, &mut items),
        TransitionKind::Resubmission => resubmission(snapshot, &mut items),
        TransitionKind::FinalReport => final_report(snapshot, &mut items),
    }
    Checklist { kind, items }
}

fn document(
    snapshot: &ThesisSnapshot,
    doc_type: DocumentType,
    name: &str,
    label: &str,
    items: &mut Vec<Requirement>,
) {
    let present = snapshot.current_document(doc_type, None).is_some();
    let detail = if present {
        format!("{label} uploaded")
    } else {
        format!("{label} missing")
    };
    items.push(Requirement::new(name, present, detail));
}

fn submission(snapshot: &ThesisSnapshot, items: &mut Vec<Requirement>) {
    document(snapshot, DocumentType::ProjectFile, "project_document", "Project document", items);

    advisor_pair(snapshot, snapshot.principal_advisor(), "advisor", "Principal advisor", items);
    if let Some(co) = snapshot.co_advisor() {
        advisor_pair(snapshot, Some(co), "co_advisor", "Co-advisor", items);
    }

    let pending: Vec<&str> = snapshot
        .co_authors()
        .filter(|a| a.acceptance != AcceptanceState::Accepted)
        .map(|a| a.user_id.as_str())
        .collect();
    if snapshot.co_authors().next().is_some() {
        let detail = if pending.is_empty() {
            "All co-authors accepted".to_string()
        } else {
            format!("Awaiting acceptance from: {}", pending.join(", "))
        };
        items.push(Requirement::new("co_authors_accepted", pending.is_empty(), detail));
    }

    document(snapshot, DocumentType::PaymentVoucher, "payment_voucher", "Payment voucher", items);

    for author in &snapshot.authors {
        let present = snapshot
            .current_document(DocumentType::AuthorSupport, Some(&author.user_id))
            .is_some();
        let detail = if present {
            format!("Supporting document of {} uploaded", author.user_id)
        } else {
            format!("Supporting document of {} missing", author.user_id)
        };
        items.push(Requirement::new(
            format!("author_document:{}", author.user_id),
            present,
            detail,
        ));
    }
}

/// Acceptance and signed letter for one advisor seat.
fn advisor_pair(
    snapshot: &ThesisSnapshot,
    advisor: Option<&Advisor>,
    prefix: &str,
    label: &str,
    items: &mut Vec<Requirement>,
) {
    let accepted_name = format!("{prefix}_accepted");
    let letter_name = format!("{prefix}_letter");

    let Some(advisor) = advisor else {
        let detail = format!("No {} assigned", label.to_lowercase());
        items.push(Requirement::new(accepted_name, false, detail.clone()));
        items.push(Requirement::new(letter_name, false, detail));
        return;
    };

    let accepted = advisor.acceptance == AcceptanceState::Accepted;
    items.push(Requirement::new(
        accepted_name,
        accepted,
        format!("{label} {} is {}", advisor.user_id, advisor.acceptance),
    ));

    let letter = snapshot.current_document(DocumentType::AdvisorLetter, Some(&advisor.user_id));
    let (ok, detail) = match letter {
        None => (false, format!("{label} acceptance letter missing")),
        Some(doc) if !doc.signature.is_valid() => (
            false,
            format!("{label} acceptance letter {} is not signed", doc.file_name),
        ),
        Some(doc) => (
            true,
            format!("{label} acceptance letter {}", doc.signature.as_str().to_lowercase()),
        ),
    };
    items.push(Requirement::new(letter_name, ok, detail));
}

fn seats(snapshot: &ThesisSnapshot, phase: Phase, roles: &[JuryRole], items: &mut Vec<Requirement>) {
    for role in roles {
        let holder = roster::seat_holder(&snapshot.jury, phase, *role);
        let detail = holder.map_or_else(
            || format!("{role} seat for {phase} is vacant"),
            |h| format!("{role} seat for {phase} held by {}", h.user_id),
        );
        items.push(Requirement::new(
            format!("jury_{}", role.as_str().to_lowercase()),
            holder.is_some(),
            detail,
        ));
    }
}

fn verdict(snapshot: &ThesisSnapshot, items: &mut Vec<Requirement>) {
    let phase = snapshot.active_phase();
    let round = snapshot.thesis.current_round;
    let vacant = roster::vacant_roles(&snapshot.jury, phase, &roster::REQUIRED_SEATS);
    let pending = roster::pending_seats(&snapshot.jury, &snapshot.evaluations, phase, round);

    let complete = vacant.is_empty() && pending.is_empty();
    let detail = if complete {
        format!("All required seats evaluated round {round}")
    } else {
        let mut waiting: Vec<String> = vacant.iter().map(|r| format!("{r} (vacant)")).collect();
        waiting.extend(pending.iter().map(|s| format!("{} ({})", s.role, s.user_id)));
        format!("Round {round} awaiting: {}", waiting.join(", "))
    };
    items.push(Requirement::new("round_complete", complete, detail));

    document(snapshot, DocumentType::Dictamen, "dictamen", "Jury dictamen", items);
}

fn resubmission(snapshot: &ThesisSnapshot, items: &mut Vec<Requirement>) {
    let phase = snapshot.active_phase();
    let observed_at = snapshot.entered_status_at(Stage::JuryObserved(phase).status());
    let doc = snapshot.current_document(phase.manuscript_type(), None);

    let (ok, detail) = match (doc, observed_at) {
        (None, _) => (false, format!("No current {} uploaded", phase.manuscript_type())),
        (Some(d), Some(at)) if d.created_at <= at => (
            false,
            format!(
                "{} uploaded {} predates the observation of {}",
                d.file_name,
                stamp(d.created_at),
                stamp(at)
            ),
        ),
        (Some(d), _) => (
            true,
            format!("Revised {} uploaded {}", d.file_name, stamp(d.created_at)),
        ),
    };
    items.push(Requirement::new("revised_document", ok, detail));
}

fn final_report(snapshot: &ThesisSnapshot, items: &mut Vec<Requirement>) {
    use DocumentType as D;

    document(snapshot, D::FinalReportFile, "final_report_document", "Final report", items);
    document(snapshot, D::FinalReportVoucher, "final_report_voucher", "Final report payment voucher", items);
    document(snapshot, D::SimilarityReport, "similarity_report", "Similarity report", items);
    document(snapshot, D::VerificationAct, "verification_act", "Advisor verification act", items);
    document(snapshot, D::ApprovalResolution, "approval_resolution", "Approval resolution", items);

    let handed = snapshot.thesis.voucher_handoff_confirmed;
    items.push(Requirement::new(
        "voucher_handoff",
        handed,
        if handed {
            "Physical voucher handed to the office"
        } else {
            "Physical voucher handoff not confirmed"
        },
    ));

    seats(snapshot, Phase::FinalReport, &roster::FULL_BENCH, items);
}

fn stamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::{Author, DocumentDescriptor, JuryMember, StatusHistoryEntry, Thesis};
    use crate::enums::{AdvisorType, HistoryAction, SignatureStatus, ThesisStatus};

    fn thesis(status: ThesisStatus) -> Thesis {
        let now = Utc::now();
        Thesis {
            id: "ths-1".into(),
            title: "Soil moisture sensing".into(),
            abstract_text: None,
            keywords: vec![],
            status,
            current_round: 1,
            current_phase: Phase::Project,
            evaluation_deadline: None,
            correction_deadline: None,
            defense_at: None,
            defense_venue: None,
            voucher_handoff_confirmed: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn author(user: &str, position: u32, acceptance: AcceptanceState) -> Author {
        Author {
            id: format!("aut-{user}"),
            thesis_id: "ths-1".into(),
            user_id: user.into(),
            position,
            acceptance,
            created_at: Utc::now(),
        }
    }

    fn advisor(user: &str, kind: AdvisorType, acceptance: AcceptanceState) -> Advisor {
        Advisor {
            id: format!("adv-{user}"),
            thesis_id: "ths-1".into(),
            user_id: user.into(),
            advisor_type: kind,
            acceptance,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn doc(doc_type: DocumentType, owner: Option<&str>, signature: SignatureStatus) -> DocumentDescriptor {
        DocumentDescriptor {
            id: format!("doc-{doc_type}"),
            thesis_id: "ths-1".into(),
            doc_type,
            owner_id: owner.map(String::from),
            file_name: format!("{doc_type}.pdf").to_lowercase(),
            is_current: true,
            signature,
            created_at: Utc::now(),
        }
    }

    fn snapshot(status: ThesisStatus) -> ThesisSnapshot {
        ThesisSnapshot {
            thesis: thesis(status),
            authors: vec![author("stu-1", 1, AcceptanceState::Accepted)],
            advisors: vec![],
            documents: vec![],
            jury: vec![],
            evaluations: vec![],
            history: vec![],
        }
    }

    fn ready_for_submission() -> ThesisSnapshot {
        let mut s = snapshot(ThesisStatus::Draft);
        s.advisors
            .push(advisor("prof-1", AdvisorType::Principal, AcceptanceState::Accepted));
        s.documents = vec![
            doc(DocumentType::ProjectFile, None, SignatureStatus::Unsigned),
            doc(DocumentType::AdvisorLetter, Some("prof-1"), SignatureStatus::Signed),
            doc(DocumentType::PaymentVoucher, None, SignatureStatus::Unsigned),
            doc(DocumentType::AuthorSupport, Some("stu-1"), SignatureStatus::Unsigned),
        ];
        s
    }

    #[test]
    fn complete_submission_is_satisfied() {
        let checklist = evaluate(TransitionKind::Submission, &ready_for_submission());
        assert!(checklist.is_satisfied(), "{}", checklist.unmet_summary());
        let names: Vec<&str> = checklist.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "project_document",
                "advisor_accepted",
                "advisor_letter",
                "payment_voucher",
                "author_document:stu-1",
            ]
        );
    }

    #[test]
    fn missing_letter_is_reported_with_other_items() {
        let mut s = ready_for_submission();
        s.documents.retain(|d| d.doc_type != DocumentType::AdvisorLetter);
        s.documents.retain(|d| d.doc_type != DocumentType::PaymentVoucher);

        let checklist = evaluate(TransitionKind::Submission, &s);
        assert!(!checklist.is_satisfied());
        assert!(!checklist.item("advisor_letter").unwrap().satisfied);
        assert!(!checklist.item("payment_voucher").unwrap().satisfied);
        assert!(checklist.item("project_document").unwrap().satisfied);
        assert_eq!(checklist.unmet_summary(), "advisor_letter, payment_voucher");
    }

    #[test]
    fn unsigned_letter_does_not_count() {
        let mut s = ready_for_submission();
        for d in &mut s.documents {
            if d.doc_type == DocumentType::AdvisorLetter {
                d.signature = SignatureStatus::Unsigned;
            }
        }
        let checklist = evaluate(TransitionKind::Submission, &s);
        let item = checklist.item("advisor_letter").unwrap();
        assert!(!item.satisfied);
        assert!(item.detail.contains("not signed"));
    }

    #[test]
    fn registered_letter_counts() {
        let mut s = ready_for_submission();
        for d in &mut s.documents {
            if d.doc_type == DocumentType::AdvisorLetter {
                d.signature = SignatureStatus::Registered;
            }
        }
        assert!(evaluate(TransitionKind::Submission, &s).is_satisfied());
    }

    #[test]
    fn co_advisor_and_co_author_add_items() {
        let mut s = ready_for_submission();
        s.advisors
            .push(advisor("prof-2", AdvisorType::CoAdvisor, AcceptanceState::Pending));
        s.authors.push(author("stu-2", 2, AcceptanceState::Pending));

        let checklist = evaluate(TransitionKind::Submission, &s);
        assert!(!checklist.item("co_advisor_accepted").unwrap().satisfied);
        assert!(!checklist.item("co_advisor_letter").unwrap().satisfied);
        let co_authors = checklist.item("co_authors_accepted").unwrap();
        assert!(!co_authors.satisfied);
        assert!(co_authors.detail.contains("stu-2"));
        assert!(!checklist.item("author_document:stu-2").unwrap().satisfied);
    }

    #[test]
    fn missing_principal_advisor_fails_both_items() {
        let mut s = ready_for_submission();
        s.advisors.clear();
        let checklist = evaluate(TransitionKind::Submission, &s);
        assert!(!checklist.item("advisor_accepted").unwrap().satisfied);
        assert!(!checklist.item("advisor_letter").unwrap().satisfied);
    }

    #[test]
    fn resubmission_rejects_stale_document() {
        let mut s = snapshot(ThesisStatus::JuryObserved);
        let upload = doc(DocumentType::ProjectFile, None, SignatureStatus::Unsigned);
        let observed_at = upload.created_at + TimeDelta::minutes(5);
        s.documents.push(upload);
        s.history.push(StatusHistoryEntry {
            id: "hst-1".into(),
            thesis_id: "ths-1".into(),
            action: HistoryAction::Transition,
            previous_status: ThesisStatus::EvaluatingJury,
            new_status: ThesisStatus::JuryObserved,
            comment: None,
            actor_id: "jury-1".into(),
            created_at: observed_at,
        });

        let checklist = evaluate(TransitionKind::Resubmission, &s);
        let item = checklist.item("revised_document").unwrap();
        assert!(!item.satisfied);
        assert!(item.detail.contains("predates"));

        s.documents[0].created_at = observed_at + TimeDelta::minutes(1);
        assert!(evaluate(TransitionKind::Resubmission, &s).is_satisfied());
    }

    #[test]
    fn resubmission_uses_phase_manuscript() {
        let mut s = snapshot(ThesisStatus::ReportObserved);
        s.documents
            .push(doc(DocumentType::ProjectFile, None, SignatureStatus::Unsigned));
        assert!(!evaluate(TransitionKind::Resubmission, &s).is_satisfied());

        s.documents
            .push(doc(DocumentType::FinalReportFile, None, SignatureStatus::Unsigned));
        assert!(evaluate(TransitionKind::Resubmission, &s).is_satisfied());
    }

    fn seat(user: &str, phase: Phase, role: JuryRole) -> JuryMember {
        JuryMember {
            id: format!("jur-{user}"),
            thesis_id: "ths-1".into(),
            user_id: user.into(),
            phase,
            role,
            is_active: true,
            assigned_at: Utc::now(),
        }
    }

    #[test]
    fn final_report_requires_full_bench_for_final_phase() {
        let mut s = snapshot(ThesisStatus::FinalReport);
        s.thesis.current_phase = Phase::FinalReport;
        s.thesis.voucher_handoff_confirmed = true;
        for t in [
            DocumentType::FinalReportFile,
            DocumentType::FinalReportVoucher,
            DocumentType::SimilarityReport,
            DocumentType::VerificationAct,
            DocumentType::ApprovalResolution,
        ] {
            s.documents.push(doc(t, None, SignatureStatus::Unsigned));
        }
        // A project-phase bench does not count.
        for (user, role) in [
            ("j1", JuryRole::President),
            ("j2", JuryRole::Vocal),
            ("j3", JuryRole::Secretary),
            ("j4", JuryRole::Alternate),
        ] {
            s.jury.push(seat(user, Phase::Project, role));
        }
        let checklist = evaluate(TransitionKind::FinalReport, &s);
        assert_eq!(
            checklist.unmet_summary(),
            "jury_president, jury_vocal, jury_secretary, jury_alternate"
        );

        for (user, role) in [
            ("j1", JuryRole::President),
            ("j2", JuryRole::Vocal),
            ("j3", JuryRole::Secretary),
            ("j4", JuryRole::Alternate),
        ] {
            s.jury.push(seat(user, Phase::FinalReport, role));
        }
        assert!(evaluate(TransitionKind::FinalReport, &s).is_satisfied());
    }

    #[test]
    fn final_report_needs_voucher_handoff() {
        let s = snapshot(ThesisStatus::FinalReport);
        let checklist = evaluate(TransitionKind::FinalReport, &s);
        assert!(!checklist.item("voucher_handoff").unwrap().satisfied);
        assert_eq!(checklist.items.len(), 10);
    }

    #[test]
    fn verdict_needs_round_complete_and_dictamen() {
        let mut s = snapshot(ThesisStatus::EvaluatingJury);
        s.jury.push(seat("j1", Phase::Project, JuryRole::President));
        let checklist = evaluate(TransitionKind::Verdict, &s);
        let round = checklist.item("round_complete").unwrap();
        assert!(!round.satisfied);
        assert!(round.detail.contains("VOCAL (vacant)"));
        assert!(round.detail.contains("PRESIDENT (j1)"));
        assert!(!checklist.item("dictamen").unwrap().satisfied);
    }
}
