//! Authors and advisors of a thesis.

use thesis_core::entities::{Advisor, Author};
use thesis_core::enums::AcceptanceState;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_u32, parse_datetime, parse_enum, ts};

const AUTHOR_COLS: &str = "id, thesis_id, user_id, position, acceptance, created_at";

const ADVISOR_COLS: &str = "id, thesis_id, user_id, advisor_type, acceptance, is_active, created_at";

fn row_to_author(row: &libsql::Row) -> Result<Author, DatabaseError> {
    Ok(Author {
        id: row.get::<String>(0)?,
        thesis_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        position: get_u32(row, 3)?,
        acceptance: parse_enum(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn row_to_advisor(row: &libsql::Row) -> Result<Advisor, DatabaseError> {
    Ok(Advisor {
        id: row.get::<String>(0)?,
        thesis_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        advisor_type: parse_enum(&row.get::<String>(3)?)?,
        acceptance: parse_enum(&row.get::<String>(4)?)?,
        is_active: get_bool(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

pub(crate) async fn insert_author(conn: &libsql::Connection, author: &Author) -> Result<(), DatabaseError> {
    conn.execute(
        &format!("INSERT INTO thesis_authors ({AUTHOR_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
        libsql::params![
            author.id.as_str(),
            author.thesis_id.as_str(),
            author.user_id.as_str(),
            i64::from(author.position),
            author.acceptance.as_str(),
            ts(author.created_at),
        ],
    )
    .await?;
    Ok(())
}

/// Authors in order, principal first.
pub(crate) async fn list_authors(conn: &libsql::Connection, thesis_id: &str) -> Result<Vec<Author>, DatabaseError> {
    let sql = format!("SELECT {AUTHOR_COLS} FROM thesis_authors WHERE thesis_id = ?1 ORDER BY position");
    let mut rows = conn.query(&sql, [thesis_id]).await?;
    let mut authors = Vec::new();
    while let Some(row) = rows.next().await? {
        authors.push(row_to_author(&row)?);
    }
    Ok(authors)
}

pub(crate) async fn set_author_acceptance(
    conn: &libsql::Connection,
    author_id: &str,
    acceptance: AcceptanceState,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE thesis_authors SET acceptance = ?1 WHERE id = ?2",
        libsql::params![acceptance.as_str(), author_id],
    )
    .await?;
    Ok(())
}

pub(crate) async fn insert_advisor(conn: &libsql::Connection, advisor: &Advisor) -> Result<(), DatabaseError> {
    conn.execute(
        &format!("INSERT INTO thesis_advisors ({ADVISOR_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        libsql::params![
            advisor.id.as_str(),
            advisor.thesis_id.as_str(),
            advisor.user_id.as_str(),
            advisor.advisor_type.as_str(),
            advisor.acceptance.as_str(),
            i64::from(advisor.is_active),
            ts(advisor.created_at),
        ],
    )
    .await?;
    Ok(())
}

/// Every advisor row, active or not, oldest first.
pub(crate) async fn list_advisors(conn: &libsql::Connection, thesis_id: &str) -> Result<Vec<Advisor>, DatabaseError> {
    let sql = format!(
        "SELECT {ADVISOR_COLS} FROM thesis_advisors WHERE thesis_id = ?1 ORDER BY created_at, rowid"
    );
    let mut rows = conn.query(&sql, [thesis_id]).await?;
    let mut advisors = Vec::new();
    while let Some(row) = rows.next().await? {
        advisors.push(row_to_advisor(&row)?);
    }
    Ok(advisors)
}

/// Record an advisor's answer. A rejection also frees the seat.
pub(crate) async fn set_advisor_acceptance(
    conn: &libsql::Connection,
    advisor_id: &str,
    acceptance: AcceptanceState,
) -> Result<(), DatabaseError> {
    let active = acceptance != AcceptanceState::Rejected;
    conn.execute(
        "UPDATE thesis_advisors SET acceptance = ?1, is_active = ?2 WHERE id = ?3",
        libsql::params![acceptance.as_str(), i64::from(active), advisor_id],
    )
    .await?;
    Ok(())
}
