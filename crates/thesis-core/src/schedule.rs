//! Advisory schedule-conflict detection for thesis defenses.
//!
//! Every defense occupies a fixed window `[start, start + duration)`. A
//! candidate conflicts with another same-day defense when the windows overlap
//! and either the venue matches (trimmed, case-insensitive) or a juror sits on
//! both. Detection never blocks scheduling; the report is handed to whoever
//! decides.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default length of a defense.
pub const DEFENSE_DURATION_MINUTES: u32 = 120;

/// Longest defense a configuration may declare.
pub const MAX_DEFENSE_DURATION_MINUTES: u32 = 24 * 60;

/// End of a window starting at `start`, clamped to the last representable
/// instant.
#[must_use]
pub fn window_end(start: DateTime<Utc>, duration: TimeDelta) -> DateTime<Utc> {
    start
        .checked_add_signed(duration)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// A proposed defense.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DefenseSlot {
    /// Thesis being scheduled; excluded from its own comparison.
    pub thesis_id: Option<String>,
    pub start: DateTime<Utc>,
    pub venue: Option<String>,
    #[serde(default)]
    pub jurors: Vec<String>,
}

/// A defense already on the calendar.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScheduledDefense {
    pub thesis_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub venue: Option<String>,
    #[serde(default)]
    pub jurors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictKind {
    Venue,
    Juror,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScheduleConflict {
    pub kind: ConflictKind,
    pub thesis_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Shared venue for `Venue` conflicts.
    pub venue: Option<String>,
    /// Shared juror for `Juror` conflicts.
    pub juror_id: Option<String>,
}

/// Result of checking a candidate slot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConflictReport {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub conflicts: Vec<ScheduleConflict>,
    /// Every other defense on the same calendar day, by start time.
    pub same_day: Vec<ScheduledDefense>,
}

impl ConflictReport {
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Canonical form of a venue for comparison.
#[must_use]
pub fn normalize_venue(venue: &str) -> String {
    venue.trim().to_lowercase()
}

fn overlaps(a_start: DateTime<Utc>, a_end: DateTime<Utc>, b_start: DateTime<Utc>, b_end: DateTime<Utc>) -> bool {
    a_start < b_end && b_start < a_end
}

/// Compare `candidate` against `existing` defenses.
///
/// Defenses on a different calendar day (UTC) or belonging to the candidate's
/// own thesis are ignored.
#[must_use]
pub fn detect_conflicts(
    candidate: &DefenseSlot,
    existing: &[ScheduledDefense],
    duration: TimeDelta,
) -> ConflictReport {
    let window_start = candidate.start;
    let window_end = window_end(candidate.start, duration);
    let day: NaiveDate = candidate.start.date_naive();
    let venue = candidate
        .venue
        .as_deref()
        .map(normalize_venue)
        .filter(|v| !v.is_empty());

    let mut same_day: Vec<ScheduledDefense> = existing
        .iter()
        .filter(|d| d.start.date_naive() == day)
        .filter(|d| candidate.thesis_id.as_deref() != Some(d.thesis_id.as_str()))
        .cloned()
        .collect();
    same_day.sort_by_key(|d| d.start);

    let mut conflicts = Vec::new();
    for other in &same_day {
        if !overlaps(window_start, window_end, other.start, other.end) {
            continue;
        }
        let conflict = |kind, venue: Option<String>, juror_id: Option<String>| ScheduleConflict {
            kind,
            thesis_id: other.thesis_id.clone(),
            title: other.title.clone(),
            start: other.start,
            end: other.end,
            venue,
            juror_id,
        };

        if let (Some(mine), Some(theirs)) = (venue.as_deref(), other.venue.as_deref()) {
            if mine == normalize_venue(theirs) {
                conflicts.push(conflict(ConflictKind::Venue, Some(theirs.trim().to_string()), None));
            }
        }
        for juror in candidate.jurors.iter().filter(|j| other.jurors.contains(j)) {
            conflicts.push(conflict(ConflictKind::Juror, None, Some(juror.clone())));
        }
    }

    ConflictReport {
        window_start,
        window_end,
        conflicts,
        same_day,
    }
}
