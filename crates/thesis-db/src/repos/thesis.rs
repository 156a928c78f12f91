//! Thesis repository: the aggregate root row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thesis_core::entities::Thesis;
use thesis_core::enums::ThesisStatus;

use crate::error::{DatabaseError, WorkflowError};
use crate::helpers::{get_bool, get_opt_datetime, get_opt_string, get_u32, opt_ts, parse_datetime, parse_enum, ts};
use crate::service::ThesisService;
use crate::updates::ThesisUpdate;

pub(crate) const SELECT_COLS: &str = "id, title, abstract, keywords, status, current_round, current_phase, \
     evaluation_deadline, correction_deadline, defense_at, defense_venue, \
     voucher_handoff_confirmed, deleted_at, created_at, updated_at";

pub(crate) fn row_to_thesis(row: &libsql::Row) -> Result<Thesis, DatabaseError> {
    let keywords: Vec<String> = serde_json::from_str(&row.get::<String>(3)?)
        .map_err(|e| DatabaseError::Query(format!("Invalid keywords JSON: {e}")))?;
    Ok(Thesis {
        id: row.get::<String>(0)?,
        title: row.get::<String>(1)?,
        abstract_text: get_opt_string(row, 2)?,
        keywords,
        status: parse_enum(&row.get::<String>(4)?)?,
        current_round: get_u32(row, 5)?,
        current_phase: parse_enum(&row.get::<String>(6)?)?,
        evaluation_deadline: get_opt_datetime(row, 7)?,
        correction_deadline: get_opt_datetime(row, 8)?,
        defense_at: get_opt_datetime(row, 9)?,
        defense_venue: get_opt_string(row, 10)?,
        voucher_handoff_confirmed: get_bool(row, 11)?,
        deleted_at: get_opt_datetime(row, 12)?,
        created_at: parse_datetime(&row.get::<String>(13)?)?,
        updated_at: parse_datetime(&row.get::<String>(14)?)?,
    })
}

/// Filter for [`ThesisService::list_theses`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThesisFilter {
    pub status: Option<ThesisStatus>,
    /// Include soft-deleted theses.
    #[serde(default)]
    pub include_deleted: bool,
    pub limit: Option<u32>,
}

pub(crate) async fn insert_thesis(conn: &libsql::Connection, thesis: &Thesis) -> Result<(), DatabaseError> {
    let keywords = serde_json::to_string(&thesis.keywords).map_err(|e| DatabaseError::Other(e.into()))?;
    conn.execute(
        "INSERT INTO theses (id, title, abstract, keywords, status, current_round, current_phase,
                             voucher_handoff_confirmed, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        libsql::params![
            thesis.id.as_str(),
            thesis.title.as_str(),
            thesis.abstract_text.as_deref(),
            keywords,
            thesis.status.as_str(),
            i64::from(thesis.current_round),
            thesis.current_phase.as_str(),
            i64::from(thesis.voucher_handoff_confirmed),
            ts(thesis.created_at),
        ],
    )
    .await?;
    Ok(())
}

/// Load a thesis, deleted or not.
pub(crate) async fn fetch_thesis(conn: &libsql::Connection, id: &str) -> Result<Thesis, WorkflowError> {
    let sql = format!("SELECT {SELECT_COLS} FROM theses WHERE id = ?1");
    let mut rows = conn.query(&sql, [id]).await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| WorkflowError::not_found("thesis", id))?;
    Ok(row_to_thesis(&row)?)
}

/// Apply `update` to a thesis whose status is still `expected`.
///
/// Zero affected rows means another writer changed the thesis since it was
/// loaded: reported as `Conflict`.
pub(crate) async fn update_thesis(
    conn: &libsql::Connection,
    id: &str,
    expected: ThesisStatus,
    update: &ThesisUpdate,
    now: DateTime<Utc>,
) -> Result<(), WorkflowError> {
    let mut sets = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    let mut set = |column: &str, value: libsql::Value| {
        params.push(value);
        sets.push(format!("{column} = ?{}", params.len()));
    };

    if let Some(status) = update.status {
        set("status", status.as_str().into());
    }
    if let Some(round) = update.current_round {
        set("current_round", i64::from(round).into());
    }
    if let Some(phase) = update.current_phase {
        set("current_phase", phase.as_str().into());
    }
    if let Some(deadline) = update.evaluation_deadline {
        set("evaluation_deadline", opt_ts(deadline));
    }
    if let Some(deadline) = update.correction_deadline {
        set("correction_deadline", opt_ts(deadline));
    }
    if let Some(at) = update.defense_at {
        set("defense_at", opt_ts(at));
    }
    if let Some(ref venue) = update.defense_venue {
        set(
            "defense_venue",
            venue.clone().map_or(libsql::Value::Null, libsql::Value::Text),
        );
    }
    if let Some(confirmed) = update.voucher_handoff_confirmed {
        set("voucher_handoff_confirmed", i64::from(confirmed).into());
    }
    if let Some(at) = update.deleted_at {
        set("deleted_at", opt_ts(at));
    }
    set("updated_at", ts(now).into());

    params.push(id.into());
    let id_idx = params.len();
    params.push(expected.as_str().into());
    let status_idx = params.len();

    let sql = format!(
        "UPDATE theses SET {} WHERE id = ?{id_idx} AND status = ?{status_idx}",
        sets.join(", ")
    );
    let changed = conn.execute(&sql, libsql::params_from_iter(params)).await?;
    if changed == 0 {
        return Err(WorkflowError::Conflict(format!(
            "thesis {id} changed concurrently (expected status {expected})"
        )));
    }
    Ok(())
}

pub(crate) async fn query_theses(
    conn: &libsql::Connection,
    filter: &ThesisFilter,
) -> Result<Vec<Thesis>, DatabaseError> {
    let mut clauses = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();
    if !filter.include_deleted {
        clauses.push("deleted_at IS NULL".to_string());
    }
    if let Some(status) = filter.status {
        params.push(status.as_str().into());
        clauses.push(format!("status = ?{}", params.len()));
    }
    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    let limit = filter
        .limit
        .map_or_else(String::new, |n| format!("LIMIT {n}"));

    let sql = format!(
        "SELECT {SELECT_COLS} FROM theses {where_clause} ORDER BY created_at DESC, rowid DESC {limit}"
    );
    let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
    let mut theses = Vec::new();
    while let Some(row) = rows.next().await? {
        theses.push(row_to_thesis(&row)?);
    }
    Ok(theses)
}

impl ThesisService {
    /// Get a thesis by ID, including soft-deleted ones.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` if the thesis does not exist.
    pub async fn get_thesis(&self, id: &str) -> Result<Thesis, WorkflowError> {
        let _guard = self.guard().await;
        fetch_thesis(self.db().conn(), id).await
    }

    /// List theses, newest first.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Database` if the query fails.
    pub async fn list_theses(&self, filter: &ThesisFilter) -> Result<Vec<Thesis>, WorkflowError> {
        let _guard = self.guard().await;
        Ok(query_theses(self.db().conn(), filter).await?)
    }
}
