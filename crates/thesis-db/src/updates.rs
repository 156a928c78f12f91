//! Update builder for the thesis row.
//!
//! Only `Some` fields generate SET clauses. Nullable columns use
//! `Option<Option<T>>`: `Some(None)` clears the column.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thesis_core::enums::{Phase, ThesisStatus};

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ThesisUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ThesisStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_round: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation_deadline: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction_deadline: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense_at: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense_venue: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_handoff_confirmed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Option<DateTime<Utc>>>,
}

impl ThesisUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub struct ThesisUpdateBuilder(ThesisUpdate);

impl Default for ThesisUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ThesisUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ThesisUpdate::default())
    }

    #[must_use]
    pub const fn status(mut self, status: ThesisStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub const fn current_round(mut self, round: u32) -> Self {
        self.0.current_round = Some(round);
        self
    }

    #[must_use]
    pub const fn current_phase(mut self, phase: Phase) -> Self {
        self.0.current_phase = Some(phase);
        self
    }

    #[must_use]
    pub const fn evaluation_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.0.evaluation_deadline = Some(deadline);
        self
    }

    #[must_use]
    pub const fn correction_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.0.correction_deadline = Some(deadline);
        self
    }

    #[must_use]
    pub const fn defense_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.0.defense_at = Some(at);
        self
    }

    #[must_use]
    pub fn defense_venue(mut self, venue: Option<String>) -> Self {
        self.0.defense_venue = Some(venue);
        self
    }

    #[must_use]
    pub const fn voucher_handoff_confirmed(mut self, confirmed: bool) -> Self {
        self.0.voucher_handoff_confirmed = Some(confirmed);
        self
    }

    #[must_use]
    pub const fn deleted_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.0.deleted_at = Some(at);
        self
    }

    #[must_use]
    pub fn build(self) -> ThesisUpdate {
        self.0
    }
}
