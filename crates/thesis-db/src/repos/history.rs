//! Append-only status history.

use chrono::{DateTime, Utc};
use thesis_core::entities::StatusHistoryEntry;
use thesis_core::enums::{HistoryAction, ThesisStatus};
use thesis_core::ids::PREFIX_HISTORY;

use crate::error::{DatabaseError, WorkflowError};
use crate::helpers::{generate_id, get_opt_string, parse_datetime, parse_enum, ts};
use crate::service::ThesisService;

const SELECT_COLS: &str = "id, thesis_id, action, previous_status, new_status, comment, actor_id, created_at";

fn row_to_entry(row: &libsql::Row) -> Result<StatusHistoryEntry, DatabaseError> {
    Ok(StatusHistoryEntry {
        id: row.get::<String>(0)?,
        thesis_id: row.get::<String>(1)?,
        action: parse_enum(&row.get::<String>(2)?)?,
        previous_status: parse_enum(&row.get::<String>(3)?)?,
        new_status: parse_enum(&row.get::<String>(4)?)?,
        comment: get_opt_string(row, 5)?,
        actor_id: row.get::<String>(6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// What happened, for [`append_history`].
pub(crate) struct HistoryEvent<'a> {
    pub action: HistoryAction,
    pub previous: ThesisStatus,
    pub new: ThesisStatus,
    pub comment: Option<&'a str>,
    pub actor_id: &'a str,
}

pub(crate) async fn append_history(
    conn: &libsql::Connection,
    thesis_id: &str,
    event: &HistoryEvent<'_>,
    now: DateTime<Utc>,
) -> Result<StatusHistoryEntry, DatabaseError> {
    let entry = StatusHistoryEntry {
        id: generate_id(conn, PREFIX_HISTORY).await?,
        thesis_id: thesis_id.to_string(),
        action: event.action,
        previous_status: event.previous,
        new_status: event.new,
        comment: event.comment.map(String::from),
        actor_id: event.actor_id.to_string(),
        created_at: now,
    };
    conn.execute(
        &format!("INSERT INTO status_history ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
        libsql::params![
            entry.id.as_str(),
            entry.thesis_id.as_str(),
            entry.action.as_str(),
            entry.previous_status.as_str(),
            entry.new_status.as_str(),
            entry.comment.as_deref(),
            entry.actor_id.as_str(),
            ts(entry.created_at),
        ],
    )
    .await?;
    Ok(entry)
}

/// History of a thesis, oldest first.
pub(crate) async fn list_history(
    conn: &libsql::Connection,
    thesis_id: &str,
) -> Result<Vec<StatusHistoryEntry>, DatabaseError> {
    let sql = format!("SELECT {SELECT_COLS} FROM status_history WHERE thesis_id = ?1 ORDER BY created_at, rowid");
    let mut rows = conn.query(&sql, [thesis_id]).await?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next().await? {
        entries.push(row_to_entry(&row)?);
    }
    Ok(entries)
}

impl ThesisService {
    /// Status history of a thesis, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` if the thesis does not exist.
    pub async fn history(&self, thesis_id: &str) -> Result<Vec<StatusHistoryEntry>, WorkflowError> {
        let _guard = self.guard().await;
        let conn = self.db().conn();
        super::thesis::fetch_thesis(conn, thesis_id).await?;
        Ok(list_history(conn, thesis_id).await?)
    }
}
