use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AcceptanceState, AdvisorType};

/// An advisor or co-advisor invited onto a thesis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Advisor {
    pub id: String,
    pub thesis_id: String,
    pub user_id: String,
    pub advisor_type: AdvisorType,
    pub acceptance: AcceptanceState,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
