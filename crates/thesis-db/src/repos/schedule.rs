//! Read-only query over booked defenses.

use chrono::{NaiveDate, TimeDelta};
use thesis_core::enums::Phase;
use thesis_core::schedule::{ScheduledDefense, window_end};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};

use super::jury::list_members;

/// Defenses of non-deleted theses in `DEFENDING` or `DEFENDED` on `day`
/// (UTC), excluding `exclude`. Jurors are the active final-report seats.
pub(crate) async fn same_day_defenses(
    conn: &libsql::Connection,
    day: NaiveDate,
    exclude: Option<&str>,
    duration: TimeDelta,
) -> Result<Vec<ScheduledDefense>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, title, defense_at, defense_venue FROM theses
             WHERE defense_at IS NOT NULL
               AND deleted_at IS NULL
               AND status IN ('DEFENDING', 'DEFENDED')
               AND substr(defense_at, 1, 10) = ?1
               AND (?2 IS NULL OR id <> ?2)
             ORDER BY defense_at",
            libsql::params![day.format("%Y-%m-%d").to_string(), exclude],
        )
        .await?;

    let mut booked = Vec::new();
    while let Some(row) = rows.next().await? {
        let start = parse_datetime(&row.get::<String>(2)?)?;
        booked.push(ScheduledDefense {
            thesis_id: row.get::<String>(0)?,
            title: row.get::<String>(1)?,
            start,
            end: window_end(start, duration),
            venue: get_opt_string(&row, 3)?,
            jurors: Vec::new(),
        });
    }

    for defense in &mut booked {
        defense.jurors = list_members(conn, &defense.thesis_id, Some(Phase::FinalReport))
            .await?
            .into_iter()
            .filter(|m| m.is_active)
            .map(|m| m.user_id)
            .collect();
    }
    Ok(booked)
}
