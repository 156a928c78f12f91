use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Phase, ThesisStatus};
use crate::stage::Stage;

/// The aggregate root tracked through the workflow.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Thesis {
    pub id: String,
    pub title: String,
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub status: ThesisStatus,
    /// Evaluation round within the current phase (starts at 1).
    pub current_round: u32,
    pub current_phase: Phase,
    pub evaluation_deadline: Option<DateTime<Utc>>,
    /// Never populated by a transition; cleared on resubmission.
    pub correction_deadline: Option<DateTime<Utc>>,
    pub defense_at: Option<DateTime<Utc>>,
    pub defense_venue: Option<String>,
    /// Students handed the physical payment voucher to the office.
    pub voucher_handoff_confirmed: bool,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Thesis {
    #[must_use]
    pub fn stage(&self) -> Stage {
        Stage::from(self.status)
    }

    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
