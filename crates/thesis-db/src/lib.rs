//! # thesis-db
//!
//! libSQL storage and the workflow service for the thesis engine.
//!
//! [`ThesisDb`] owns the connection and schema. [`service::ThesisService`]
//! is the state machine: every operation loads the thesis aggregate, checks
//! the status precondition and requirement checklist, then applies the change
//! and its history entry inside one `BEGIN IMMEDIATE` transaction.
//! Notifications go out only after commit.

pub mod error;
pub mod helpers;
mod migrations;
pub mod notify;
pub mod repos;
pub mod service;
pub mod updates;
pub mod workflow;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Database handle: a libSQL database and its single connection.
pub struct ThesisDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl ThesisDb {
    /// Open a local database at `path` (`:memory:` for a throwaway one).
    ///
    /// Runs migrations automatically on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
        // Wait for other processes holding the write lock instead of failing.
        conn.query("PRAGMA busy_timeout = 5000", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA busy_timeout: {e}")))?;

        let thesis_db = Self { db, conn };
        thesis_db.run_migrations().await?;
        Ok(thesis_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID. Returns e.g., `"ths-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        helpers::generate_id(&self.conn, prefix).await
    }
}
