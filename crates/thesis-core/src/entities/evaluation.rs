use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EvaluationResult, Phase};

/// One juror's evaluation for one round. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct JuryEvaluation {
    pub id: String,
    pub thesis_id: String,
    pub jury_member_id: String,
    pub phase: Phase,
    pub round: u32,
    pub result: EvaluationResult,
    pub observation: Option<String>,
    pub document_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
