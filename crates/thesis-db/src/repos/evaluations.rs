//! Jury evaluations. One per (seat, round), immutable once written.

use thesis_core::entities::JuryEvaluation;
use thesis_core::enums::Phase;
use thesis_core::roster;

use crate::error::{DatabaseError, WorkflowError};
use crate::helpers::{get_opt_string, get_u32, parse_datetime, parse_enum, ts};
use crate::service::ThesisService;

const SELECT_COLS: &str =
    "id, thesis_id, jury_member_id, phase, round, result, observation, document_id, created_at";

fn row_to_evaluation(row: &libsql::Row) -> Result<JuryEvaluation, DatabaseError> {
    Ok(JuryEvaluation {
        id: row.get::<String>(0)?,
        thesis_id: row.get::<String>(1)?,
        jury_member_id: row.get::<String>(2)?,
        phase: parse_enum(&row.get::<String>(3)?)?,
        round: get_u32(row, 4)?,
        result: parse_enum(&row.get::<String>(5)?)?,
        observation: get_opt_string(row, 6)?,
        document_id: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

/// Insert an evaluation. A second one for the same (seat, round) fails with a
/// UNIQUE violation, surfaced as `WorkflowError::Conflict`.
pub(crate) async fn insert_evaluation(
    conn: &libsql::Connection,
    evaluation: &JuryEvaluation,
) -> Result<(), DatabaseError> {
    conn.execute(
        &format!("INSERT INTO jury_evaluations ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
        libsql::params![
            evaluation.id.as_str(),
            evaluation.thesis_id.as_str(),
            evaluation.jury_member_id.as_str(),
            evaluation.phase.as_str(),
            i64::from(evaluation.round),
            evaluation.result.as_str(),
            evaluation.observation.as_deref(),
            evaluation.document_id.as_deref(),
            ts(evaluation.created_at),
        ],
    )
    .await?;
    Ok(())
}

/// Evaluations of a thesis, optionally narrowed to a phase and round.
pub(crate) async fn list_evaluations(
    conn: &libsql::Connection,
    thesis_id: &str,
    phase: Option<Phase>,
    round: Option<u32>,
) -> Result<Vec<JuryEvaluation>, DatabaseError> {
    let mut clauses = vec!["thesis_id = ?1".to_string()];
    let mut params: Vec<libsql::Value> = vec![thesis_id.into()];
    if let Some(phase) = phase {
        params.push(phase.as_str().into());
        clauses.push(format!("phase = ?{}", params.len()));
    }
    if let Some(round) = round {
        params.push(i64::from(round).into());
        clauses.push(format!("round = ?{}", params.len()));
    }
    let sql = format!(
        "SELECT {SELECT_COLS} FROM jury_evaluations WHERE {} ORDER BY created_at, rowid",
        clauses.join(" AND ")
    );
    let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
    let mut evaluations = Vec::new();
    while let Some(row) = rows.next().await? {
        evaluations.push(row_to_evaluation(&row)?);
    }
    Ok(evaluations)
}

pub(crate) async fn exists_for_round(
    conn: &libsql::Connection,
    jury_member_id: &str,
    round: u32,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT 1 FROM jury_evaluations WHERE jury_member_id = ?1 AND round = ?2",
            libsql::params![jury_member_id, i64::from(round)],
        )
        .await?;
    Ok(rows.next().await?.is_some())
}

impl ThesisService {
    /// Evaluations submitted for `phase` and `round`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` if the thesis does not exist.
    pub async fn evaluations_for(
        &self,
        thesis_id: &str,
        phase: Phase,
        round: u32,
    ) -> Result<Vec<JuryEvaluation>, WorkflowError> {
        let _guard = self.guard().await;
        let conn = self.db().conn();
        super::thesis::fetch_thesis(conn, thesis_id).await?;
        Ok(list_evaluations(conn, thesis_id, Some(phase), Some(round)).await?)
    }

    /// Whether a seat has evaluated `round`.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` if the seat does not exist.
    pub async fn has_evaluated(&self, jury_member_id: &str, round: u32) -> Result<bool, WorkflowError> {
        let _guard = self.guard().await;
        let conn = self.db().conn();
        super::jury::fetch_member(conn, jury_member_id).await?;
        Ok(exists_for_round(conn, jury_member_id, round).await?)
    }

    /// Whether every required active seat of `phase` has evaluated `round`.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` if the thesis does not exist.
    pub async fn is_round_complete(
        &self,
        thesis_id: &str,
        phase: Phase,
        round: u32,
    ) -> Result<bool, WorkflowError> {
        let _guard = self.guard().await;
        let conn = self.db().conn();
        super::thesis::fetch_thesis(conn, thesis_id).await?;
        let seats = super::jury::list_members(conn, thesis_id, Some(phase)).await?;
        let evaluations = list_evaluations(conn, thesis_id, Some(phase), Some(round)).await?;
        Ok(roster::is_round_complete(&seats, &evaluations, phase, round))
    }
}
