use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AcceptanceState;

/// A student author. `position == 1` is the principal author.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub thesis_id: String,
    pub user_id: String,
    pub position: u32,
    pub acceptance: AcceptanceState,
    pub created_at: DateTime<Utc>,
}

impl Author {
    #[must_use]
    pub const fn is_principal(&self) -> bool {
        self.position == 1
    }
}
