use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{JuryRole, Phase};

/// A jury seat, scoped by phase. Removal deactivates the row so past
/// evaluations stay attributable.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct JuryMember {
    pub id: String,
    pub thesis_id: String,
    pub user_id: String,
    pub phase: Phase,
    pub role: JuryRole,
    pub is_active: bool,
    pub assigned_at: DateTime<Utc>,
}
