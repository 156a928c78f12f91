//! Jury seats. Seats are deactivated on removal, never deleted, so every
//! evaluation stays attributable.

use thesis_core::entities::JuryMember;
use thesis_core::enums::Phase;

use crate::error::{DatabaseError, WorkflowError};
use crate::helpers::{get_bool, parse_datetime, parse_enum, ts};
use crate::service::ThesisService;

const SELECT_COLS: &str = "id, thesis_id, user_id, phase, role, is_active, assigned_at";

fn row_to_member(row: &libsql::Row) -> Result<JuryMember, DatabaseError> {
    Ok(JuryMember {
        id: row.get::<String>(0)?,
        thesis_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        phase: parse_enum(&row.get::<String>(3)?)?,
        role: parse_enum(&row.get::<String>(4)?)?,
        is_active: get_bool(row, 5)?,
        assigned_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

pub(crate) async fn insert_member(conn: &libsql::Connection, member: &JuryMember) -> Result<(), DatabaseError> {
    conn.execute(
        &format!("INSERT INTO jury_members ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        libsql::params![
            member.id.as_str(),
            member.thesis_id.as_str(),
            member.user_id.as_str(),
            member.phase.as_str(),
            member.role.as_str(),
            i64::from(member.is_active),
            ts(member.assigned_at),
        ],
    )
    .await?;
    Ok(())
}

pub(crate) async fn fetch_member(conn: &libsql::Connection, id: &str) -> Result<JuryMember, WorkflowError> {
    let sql = format!("SELECT {SELECT_COLS} FROM jury_members WHERE id = ?1");
    let mut rows = conn.query(&sql, [id]).await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| WorkflowError::not_found("jury seat", id))?;
    Ok(row_to_member(&row)?)
}

/// Seats of a thesis, active and inactive, optionally for one phase.
pub(crate) async fn list_members(
    conn: &libsql::Connection,
    thesis_id: &str,
    phase: Option<Phase>,
) -> Result<Vec<JuryMember>, DatabaseError> {
    let mut rows = match phase {
        Some(phase) => {
            let sql = format!(
                "SELECT {SELECT_COLS} FROM jury_members WHERE thesis_id = ?1 AND phase = ?2 ORDER BY assigned_at, rowid"
            );
            conn.query(&sql, libsql::params![thesis_id, phase.as_str()]).await?
        }
        None => {
            let sql = format!(
                "SELECT {SELECT_COLS} FROM jury_members WHERE thesis_id = ?1 ORDER BY assigned_at, rowid"
            );
            conn.query(&sql, [thesis_id]).await?
        }
    };
    let mut members = Vec::new();
    while let Some(row) = rows.next().await? {
        members.push(row_to_member(&row)?);
    }
    Ok(members)
}

/// Active seats held by `user_id` on any phase of the thesis.
pub(crate) async fn active_seats_of_user(
    conn: &libsql::Connection,
    thesis_id: &str,
    user_id: &str,
) -> Result<Vec<JuryMember>, DatabaseError> {
    let sql = format!(
        "SELECT {SELECT_COLS} FROM jury_members WHERE thesis_id = ?1 AND user_id = ?2 AND is_active = 1"
    );
    let mut rows = conn.query(&sql, [thesis_id, user_id]).await?;
    let mut members = Vec::new();
    while let Some(row) = rows.next().await? {
        members.push(row_to_member(&row)?);
    }
    Ok(members)
}

pub(crate) async fn deactivate_member(conn: &libsql::Connection, id: &str) -> Result<(), DatabaseError> {
    conn.execute("UPDATE jury_members SET is_active = 0 WHERE id = ?1", [id])
        .await?;
    Ok(())
}

impl ThesisService {
    /// Active seats of `phase`, in assignment order.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` if the thesis does not exist.
    pub async fn seats_for(&self, thesis_id: &str, phase: Phase) -> Result<Vec<JuryMember>, WorkflowError> {
        let _guard = self.guard().await;
        let conn = self.db().conn();
        super::thesis::fetch_thesis(conn, thesis_id).await?;
        let mut seats = list_members(conn, thesis_id, Some(phase)).await?;
        seats.retain(|s| s.is_active);
        Ok(seats)
    }
}
