//! Aggregate loader.

use thesis_core::entities::ThesisSnapshot;

use crate::error::WorkflowError;
use crate::service::ThesisService;

use super::{documents, evaluations, history, jury, people, thesis};

/// Load the thesis with every relation the workflow rules read.
pub(crate) async fn load_snapshot(
    conn: &libsql::Connection,
    thesis_id: &str,
) -> Result<ThesisSnapshot, WorkflowError> {
    let thesis = thesis::fetch_thesis(conn, thesis_id).await?;
    Ok(ThesisSnapshot {
        authors: people::list_authors(conn, thesis_id).await?,
        advisors: people::list_advisors(conn, thesis_id).await?,
        documents: documents::list_documents(conn, thesis_id, true).await?,
        jury: jury::list_members(conn, thesis_id, None).await?,
        evaluations: evaluations::list_evaluations(conn, thesis_id, None, None).await?,
        history: history::list_history(conn, thesis_id).await?,
        thesis,
    })
}

impl ThesisService {
    /// The thesis with its authors, advisors, current documents, seats,
    /// evaluations and history.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` if the thesis does not exist.
    pub async fn thesis_snapshot(&self, thesis_id: &str) -> Result<ThesisSnapshot, WorkflowError> {
        let _guard = self.guard().await;
        load_snapshot(self.db().conn(), thesis_id).await
    }
}
