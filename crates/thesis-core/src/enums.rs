//! Status enums, seat types, document types, and actions for the thesis workflow.
//!
//! All enums serialize as `SCREAMING_SNAKE_CASE`, which is also the form stored
//! in SQL. Every enum exposes `ALL` so string parsing can report the accepted
//! values, and `ThesisStatus` provides `allowed_next_states()` for the
//! happy-path workflow edges.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Parse `s` against the `as_str` form of every member of `all`.
fn parse_named<T: Copy>(
    s: &str,
    all: &[T],
    as_str: fn(T) -> &'static str,
    what: &str,
) -> Result<T, CoreError> {
    let wanted = s.trim();
    all.iter()
        .copied()
        .find(|v| as_str(*v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            let accepted: Vec<&str> = all.iter().map(|v| as_str(*v)).collect();
            CoreError::Validation(format!(
                "unknown {what} '{s}' (expected one of: {})",
                accepted.join(", ")
            ))
        })
}

// ---------------------------------------------------------------------------
// ThesisStatus
// ---------------------------------------------------------------------------

/// Status of a thesis through its workflow.
///
/// ```text
/// DRAFT → IN_REVIEW → OBSERVED → IN_REVIEW
///                   → ASSIGNING_JURY → EVALUATING_JURY → JURY_OBSERVED → EVALUATING_JURY
///                                                      → PROJECT_APPROVED → FINAL_REPORT
/// FINAL_REPORT → EVALUATING_REPORT → REPORT_OBSERVED → EVALUATING_REPORT
///                                  → APPROVED → DEFENDING → DEFENDED
/// ARCHIVED and REJECTED are reached only by administrative override.
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThesisStatus {
    Draft,
    InReview,
    Observed,
    AssigningJury,
    EvaluatingJury,
    JuryObserved,
    ProjectApproved,
    FinalReport,
    EvaluatingReport,
    ReportObserved,
    Approved,
    Defending,
    Defended,
    Archived,
    Rejected,
}

impl ThesisStatus {
    pub const ALL: &'static [Self] = &[
        Self::Draft,
        Self::InReview,
        Self::Observed,
        Self::AssigningJury,
        Self::EvaluatingJury,
        Self::JuryObserved,
        Self::ProjectApproved,
        Self::FinalReport,
        Self::EvaluatingReport,
        Self::ReportObserved,
        Self::Approved,
        Self::Defending,
        Self::Defended,
        Self::Archived,
        Self::Rejected,
    ];

    /// Valid workflow successors. Administrative overrides bypass this table.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft | Self::Observed => &[Self::InReview],
            Self::InReview => &[Self::Observed, Self::AssigningJury],
            Self::AssigningJury | Self::JuryObserved => &[Self::EvaluatingJury],
            Self::EvaluatingJury => &[Self::JuryObserved, Self::ProjectApproved],
            Self::ProjectApproved => &[Self::FinalReport],
            Self::FinalReport | Self::ReportObserved => &[Self::EvaluatingReport],
            Self::EvaluatingReport => &[Self::ReportObserved, Self::Approved],
            Self::Approved => &[Self::Defending],
            Self::Defending => &[Self::Defended],
            Self::Defended | Self::Archived | Self::Rejected => &[],
        }
    }

    /// Check whether the workflow allows moving to `next`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Defended | Self::Archived | Self::Rejected)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::InReview => "IN_REVIEW",
            Self::Observed => "OBSERVED",
            Self::AssigningJury => "ASSIGNING_JURY",
            Self::EvaluatingJury => "EVALUATING_JURY",
            Self::JuryObserved => "JURY_OBSERVED",
            Self::ProjectApproved => "PROJECT_APPROVED",
            Self::FinalReport => "FINAL_REPORT",
            Self::EvaluatingReport => "EVALUATING_REPORT",
            Self::ReportObserved => "REPORT_OBSERVED",
            Self::Approved => "APPROVED",
            Self::Defending => "DEFENDING",
            Self::Defended => "DEFENDED",
            Self::Archived => "ARCHIVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ThesisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThesisStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, Self::ALL, Self::as_str, "thesis status")
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Evaluation phase. Each phase has its own jury roster and round counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Project,
    FinalReport,
}

impl Phase {
    pub const ALL: &'static [Self] = &[Self::Project, Self::FinalReport];

    /// Document type the students revise and resubmit in this phase.
    #[must_use]
    pub const fn manuscript_type(self) -> DocumentType {
        match self {
            Self::Project => DocumentType::ProjectFile,
            Self::FinalReport => DocumentType::FinalReportFile,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "PROJECT",
            Self::FinalReport => "FINAL_REPORT",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, Self::ALL, Self::as_str, "phase")
    }
}

// ---------------------------------------------------------------------------
// JuryRole
// ---------------------------------------------------------------------------

/// Seat type on a jury.
///
/// `Alternate` seats are advisory: unlimited in number, excluded from
/// uniqueness and round-completion checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JuryRole {
    President,
    Vocal,
    Secretary,
    Alternate,
}

impl JuryRole {
    pub const ALL: &'static [Self] = &[Self::President, Self::Vocal, Self::Secretary, Self::Alternate];

    /// Whether this seat counts toward round completion and is unique per phase.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Alternate)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::President => "PRESIDENT",
            Self::Vocal => "VOCAL",
            Self::Secretary => "SECRETARY",
            Self::Alternate => "ALTERNATE",
        }
    }
}

impl fmt::Display for JuryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JuryRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, Self::ALL, Self::as_str, "jury role")
    }
}

// ---------------------------------------------------------------------------
// AcceptanceState
// ---------------------------------------------------------------------------

/// Response of an invited co-author or advisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcceptanceState {
    Pending,
    Accepted,
    Rejected,
}

impl AcceptanceState {
    pub const ALL: &'static [Self] = &[Self::Pending, Self::Accepted, Self::Rejected];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for AcceptanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AdvisorType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisorType {
    Principal,
    CoAdvisor,
}

impl AdvisorType {
    pub const ALL: &'static [Self] = &[Self::Principal, Self::CoAdvisor];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Principal => "PRINCIPAL",
            Self::CoAdvisor => "CO_ADVISOR",
        }
    }
}

impl fmt::Display for AdvisorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdvisorType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, Self::ALL, Self::as_str, "advisor type")
    }
}

// ---------------------------------------------------------------------------
// EvaluationResult
// ---------------------------------------------------------------------------

/// A juror's verdict for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationResult {
    Approved,
    Observed,
}

impl EvaluationResult {
    pub const ALL: &'static [Self] = &[Self::Approved, Self::Observed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Observed => "OBSERVED",
        }
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationResult {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, Self::ALL, Self::as_str, "evaluation result")
    }
}

// ---------------------------------------------------------------------------
// DocumentType
// ---------------------------------------------------------------------------

/// Kind of document attached to a thesis by the document collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    ProjectFile,
    PaymentVoucher,
    AdvisorLetter,
    AuthorSupport,
    SimilarityReport,
    FinalReportFile,
    FinalReportVoucher,
    VerificationAct,
    ApprovalResolution,
    Dictamen,
    EvaluationAttachment,
}

impl DocumentType {
    pub const ALL: &'static [Self] = &[
        Self::ProjectFile,
        Self::PaymentVoucher,
        Self::AdvisorLetter,
        Self::AuthorSupport,
        Self::SimilarityReport,
        Self::FinalReportFile,
        Self::FinalReportVoucher,
        Self::VerificationAct,
        Self::ApprovalResolution,
        Self::Dictamen,
        Self::EvaluationAttachment,
    ];

    /// Document types that belong to one person (versioned per owner).
    #[must_use]
    pub const fn is_owned(self) -> bool {
        matches!(
            self,
            Self::AdvisorLetter | Self::AuthorSupport | Self::EvaluationAttachment
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProjectFile => "PROJECT_FILE",
            Self::PaymentVoucher => "PAYMENT_VOUCHER",
            Self::AdvisorLetter => "ADVISOR_LETTER",
            Self::AuthorSupport => "AUTHOR_SUPPORT",
            Self::SimilarityReport => "SIMILARITY_REPORT",
            Self::FinalReportFile => "FINAL_REPORT_FILE",
            Self::FinalReportVoucher => "FINAL_REPORT_VOUCHER",
            Self::VerificationAct => "VERIFICATION_ACT",
            Self::ApprovalResolution => "APPROVAL_RESOLUTION",
            Self::Dictamen => "DICTAMEN",
            Self::EvaluationAttachment => "EVALUATION_ATTACHMENT",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, Self::ALL, Self::as_str, "document type")
    }
}

// ---------------------------------------------------------------------------
// SignatureStatus
// ---------------------------------------------------------------------------

/// Signature state reported by the signature collaborator.
///
/// `Registered` covers letters signed on paper and registered by a clerk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureStatus {
    Unsigned,
    Signed,
    Registered,
}

impl SignatureStatus {
    pub const ALL: &'static [Self] = &[Self::Unsigned, Self::Signed, Self::Registered];

    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Signed | Self::Registered)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsigned => "UNSIGNED",
            Self::Signed => "SIGNED",
            Self::Registered => "REGISTERED",
        }
    }
}

impl fmt::Display for SignatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, Self::ALL, Self::as_str, "signature status")
    }
}

// ---------------------------------------------------------------------------
// HistoryAction
// ---------------------------------------------------------------------------

/// Kind of event recorded in the status history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryAction {
    /// A workflow transition fired.
    Transition,
    /// An administrator moved the thesis outside the happy path.
    Override,
    /// The thesis was soft-deleted.
    Delete,
    /// The soft-delete marker was cleared.
    Restore,
}

impl HistoryAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transition => "TRANSITION",
            Self::Override => "OVERRIDE",
            Self::Delete => "DELETE",
            Self::Restore => "RESTORE",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TransitionKind
// ---------------------------------------------------------------------------

/// Transitions gated by a requirement checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionKind {
    Submission,
    StartEvaluation,
    Verdict,
    Resubmission,
    FinalReport,
}

impl TransitionKind {
    pub const ALL: &'static [Self] = &[
        Self::Submission,
        Self::StartEvaluation,
        Self::Verdict,
        Self::Resubmission,
        Self::FinalReport,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submission => "SUBMISSION",
            Self::StartEvaluation => "START_EVALUATION",
            Self::Verdict => "VERDICT",
            Self::Resubmission => "RESUBMISSION",
            Self::FinalReport => "FINAL_REPORT",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, Self::ALL, Self::as_str, "transition kind")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(
        status_assigning_jury,
        ThesisStatus,
        ThesisStatus::AssigningJury,
        "ASSIGNING_JURY"
    );
    test_serde_roundtrip!(
        status_report_observed,
        ThesisStatus,
        ThesisStatus::ReportObserved,
        "REPORT_OBSERVED"
    );
    test_serde_roundtrip!(phase_final_report, Phase, Phase::FinalReport, "FINAL_REPORT");
    test_serde_roundtrip!(role_alternate, JuryRole, JuryRole::Alternate, "ALTERNATE");
    test_serde_roundtrip!(
        advisor_co,
        AdvisorType,
        AdvisorType::CoAdvisor,
        "CO_ADVISOR"
    );
    test_serde_roundtrip!(
        doc_verification_act,
        DocumentType,
        DocumentType::VerificationAct,
        "VERIFICATION_ACT"
    );

    #[test]
    fn as_str_matches_serde_for_every_status() {
        for status in ThesisStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn happy_path_transitions() {
        let path = [
            ThesisStatus::Draft,
            ThesisStatus::InReview,
            ThesisStatus::AssigningJury,
            ThesisStatus::EvaluatingJury,
            ThesisStatus::ProjectApproved,
            ThesisStatus::FinalReport,
            ThesisStatus::EvaluatingReport,
            ThesisStatus::Approved,
            ThesisStatus::Defending,
            ThesisStatus::Defended,
        ];
        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{} -> {} should be allowed",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn observation_loops_return_to_evaluation() {
        assert!(ThesisStatus::JuryObserved.can_transition_to(ThesisStatus::EvaluatingJury));
        assert!(ThesisStatus::ReportObserved.can_transition_to(ThesisStatus::EvaluatingReport));
        assert!(ThesisStatus::Observed.can_transition_to(ThesisStatus::InReview));
    }

    #[test]
    fn invalid_transitions() {
        assert!(!ThesisStatus::Draft.can_transition_to(ThesisStatus::AssigningJury));
        assert!(!ThesisStatus::EvaluatingJury.can_transition_to(ThesisStatus::Approved));
        assert!(!ThesisStatus::InReview.can_transition_to(ThesisStatus::Archived));
    }

    #[test]
    fn terminal_states_have_no_successors() {
        for status in ThesisStatus::ALL.iter().filter(|s| s.is_terminal()) {
            assert!(status.allowed_next_states().is_empty(), "{status}");
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "in_review".parse::<ThesisStatus>().unwrap(),
            ThesisStatus::InReview
        );
        assert_eq!(" vocal ".parse::<JuryRole>().unwrap(), JuryRole::Vocal);
    }

    #[test]
    fn parse_unknown_lists_accepted_values() {
        let err = "PENDING_DEFENSE".parse::<ThesisStatus>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("PENDING_DEFENSE"), "{msg}");
        assert!(msg.contains("DEFENDED"), "{msg}");
    }

    #[test]
    fn only_alternate_is_advisory() {
        assert!(JuryRole::President.is_required());
        assert!(JuryRole::Vocal.is_required());
        assert!(JuryRole::Secretary.is_required());
        assert!(!JuryRole::Alternate.is_required());
    }

    #[test]
    fn signature_validity() {
        assert!(!SignatureStatus::Unsigned.is_valid());
        assert!(SignatureStatus::Signed.is_valid());
        assert!(SignatureStatus::Registered.is_valid());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", ThesisStatus::ProjectApproved), "PROJECT_APPROVED");
        assert_eq!(format!("{}", Phase::Project), "PROJECT");
        assert_eq!(format!("{}", AcceptanceState::Pending), "PENDING");
        assert_eq!(format!("{}", EvaluationResult::Observed), "OBSERVED");
        assert_eq!(format!("{}", SignatureStatus::Registered), "REGISTERED");
        assert_eq!(format!("{}", HistoryAction::Restore), "RESTORE");
        assert_eq!(format!("{}", TransitionKind::FinalReport), "FINAL_REPORT");
    }
}
