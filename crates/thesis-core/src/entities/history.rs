use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{HistoryAction, ThesisStatus};

/// An append-only status history entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusHistoryEntry {
    pub id: String,
    pub thesis_id: String,
    pub action: HistoryAction,
    pub previous_status: ThesisStatus,
    pub new_status: ThesisStatus,
    pub comment: Option<String>,
    pub actor_id: String,
    pub created_at: DateTime<Utc>,
}
