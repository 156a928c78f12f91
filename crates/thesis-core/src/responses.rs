//! Result types returned by service operations and rendered by the CLI.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{JuryEvaluation, Thesis};
use crate::enums::{EvaluationResult, ThesisStatus};
use crate::schedule::ConflictReport;

/// Outcome of `submit_evaluation`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvaluationReceipt {
    pub evaluation: JuryEvaluation,
    /// All required seats have now evaluated this round; the president may
    /// issue the dictamen.
    pub round_complete: bool,
}

/// Outcome of `issue_verdict`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VerdictOutcome {
    pub thesis: Thesis,
    pub verdict: EvaluationResult,
}

/// Outcome of `schedule_defense`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DefenseScheduled {
    pub thesis: Thesis,
    pub report: ConflictReport,
}

/// A thesis whose evaluation deadline has passed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OverdueEvaluation {
    pub thesis_id: String,
    pub title: String,
    pub status: ThesisStatus,
    pub round: u32,
    pub deadline: DateTime<Utc>,
    pub business_days_overdue: u32,
}
