//! Document descriptors.
//!
//! Only metadata is stored: type, owner, currency and signature state. At most
//! one descriptor per (thesis, type, owner) is current; attaching a new one
//! supersedes the previous.

use thesis_core::entities::DocumentDescriptor;
use thesis_core::enums::{DocumentType, SignatureStatus};

use crate::error::{DatabaseError, WorkflowError};
use crate::helpers::{get_bool, get_opt_string, parse_datetime, parse_enum, ts};
use crate::service::ThesisService;

const SELECT_COLS: &str = "id, thesis_id, doc_type, owner_id, file_name, is_current, signature, created_at";

fn row_to_document(row: &libsql::Row) -> Result<DocumentDescriptor, DatabaseError> {
    Ok(DocumentDescriptor {
        id: row.get::<String>(0)?,
        thesis_id: row.get::<String>(1)?,
        doc_type: parse_enum(&row.get::<String>(2)?)?,
        owner_id: get_opt_string(row, 3)?,
        file_name: row.get::<String>(4)?,
        is_current: get_bool(row, 5)?,
        signature: parse_enum(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Insert `doc` as the current version, retiring the one it replaces.
pub(crate) async fn insert_document(
    conn: &libsql::Connection,
    doc: &DocumentDescriptor,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE documents SET is_current = 0
         WHERE thesis_id = ?1 AND doc_type = ?2 AND owner_id IS ?3 AND is_current = 1",
        libsql::params![doc.thesis_id.as_str(), doc.doc_type.as_str(), doc.owner_id.as_deref()],
    )
    .await?;
    conn.execute(
        &format!("INSERT INTO documents ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7)"),
        libsql::params![
            doc.id.as_str(),
            doc.thesis_id.as_str(),
            doc.doc_type.as_str(),
            doc.owner_id.as_deref(),
            doc.file_name.as_str(),
            doc.signature.as_str(),
            ts(doc.created_at),
        ],
    )
    .await?;
    Ok(())
}

/// Mark every current document of `doc_type` non-current. Returns how many
/// were retired.
pub(crate) async fn retire_current(
    conn: &libsql::Connection,
    thesis_id: &str,
    doc_type: DocumentType,
) -> Result<u64, DatabaseError> {
    Ok(conn
        .execute(
            "UPDATE documents SET is_current = 0 WHERE thesis_id = ?1 AND doc_type = ?2 AND is_current = 1",
            libsql::params![thesis_id, doc_type.as_str()],
        )
        .await?)
}

pub(crate) async fn fetch_document(conn: &libsql::Connection, id: &str) -> Result<DocumentDescriptor, WorkflowError> {
    let sql = format!("SELECT {SELECT_COLS} FROM documents WHERE id = ?1");
    let mut rows = conn.query(&sql, [id]).await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| WorkflowError::not_found("document", id))?;
    Ok(row_to_document(&row)?)
}

pub(crate) async fn list_documents(
    conn: &libsql::Connection,
    thesis_id: &str,
    current_only: bool,
) -> Result<Vec<DocumentDescriptor>, DatabaseError> {
    let filter = if current_only { "AND is_current = 1" } else { "" };
    let sql = format!(
        "SELECT {SELECT_COLS} FROM documents WHERE thesis_id = ?1 {filter} ORDER BY created_at, rowid"
    );
    let mut rows = conn.query(&sql, [thesis_id]).await?;
    let mut docs = Vec::new();
    while let Some(row) = rows.next().await? {
        docs.push(row_to_document(&row)?);
    }
    Ok(docs)
}

pub(crate) async fn set_signature(
    conn: &libsql::Connection,
    id: &str,
    signature: SignatureStatus,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE documents SET signature = ?1 WHERE id = ?2",
        libsql::params![signature.as_str(), id],
    )
    .await?;
    Ok(())
}

impl ThesisService {
    /// Every document version attached to a thesis, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` if the thesis does not exist.
    pub async fn list_documents(
        &self,
        thesis_id: &str,
        current_only: bool,
    ) -> Result<Vec<DocumentDescriptor>, WorkflowError> {
        let _guard = self.guard().await;
        let conn = self.db().conn();
        super::thesis::fetch_thesis(conn, thesis_id).await?;
        Ok(list_documents(conn, thesis_id, current_only).await?)
    }
}
