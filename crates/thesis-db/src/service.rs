//! Service layer: the thesis state machine.
//!
//! `ThesisService` wraps [`ThesisDb`], the workflow settings and a
//! [`Notifier`]. Workflow operations live in [`crate::workflow`] and read
//! operations in [`crate::repos`], all as `impl ThesisService` blocks.
//!
//! Every mutation follows this protocol:
//! 1. Take the service lock
//! 2. `BEGIN IMMEDIATE`
//! 3. Load the aggregate, check status and checklist
//! 4. Update the thesis row guarded by its current status
//! 5. Append the history entry
//! 6. Commit, or roll back on any error
//! 7. Dispatch notifications (failures are logged and swallowed)

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use libsql::{Transaction, TransactionBehavior};
use thesis_config::{ThesisConfig, WorkflowConfig};
use thesis_core::calendar::add_business_days;
use thesis_core::notify::{Notification, Notifier};
use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

use crate::ThesisDb;
use crate::error::{DatabaseError, WorkflowError};
use crate::notify::TracingNotifier;

pub struct ThesisService {
    db: ThesisDb,
    workflow: WorkflowConfig,
    notifier: Arc<dyn Notifier>,
    lock: Mutex<()>,
}

impl ThesisService {
    /// Open a local database and wrap it with default workflow settings.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = ThesisDb::open_local(db_path).await?;
        Ok(Self::from_db(db, WorkflowConfig::default(), Arc::new(TracingNotifier)))
    }

    /// Open the database named by `config`, creating its directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory or database cannot be created.
    pub async fn open(config: &ThesisConfig, notifier: Arc<dyn Notifier>) -> Result<Self, DatabaseError> {
        if let Some(dir) = config.database.parent_dir() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                DatabaseError::Other(anyhow::anyhow!("create {}: {e}", dir.display()))
            })?;
        }
        let db = ThesisDb::open_local(&config.database.path).await?;
        Ok(Self::from_db(db, config.workflow.clone(), notifier))
    }

    #[must_use]
    pub fn from_db(db: ThesisDb, workflow: WorkflowConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            workflow,
            notifier,
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub const fn db(&self) -> &ThesisDb {
        &self.db
    }

    #[must_use]
    pub const fn workflow(&self) -> &WorkflowConfig {
        &self.workflow
    }

    /// Serialize access to the shared connection. Reads take it too so they
    /// never observe a transaction in progress.
    pub(crate) async fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }

    /// Start a write transaction. `IMMEDIATE` takes the database write lock
    /// up front so a second process blocks instead of reading stale state.
    pub(crate) async fn begin(&self) -> Result<Transaction, DatabaseError> {
        Ok(self
            .db
            .conn()
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?)
    }

    /// Commit on success, roll back on failure.
    pub(crate) async fn finish<T>(
        tx: Transaction,
        result: Result<T, WorkflowError>,
    ) -> Result<T, WorkflowError> {
        match result {
            Ok(value) => {
                tx.commit().await.map_err(DatabaseError::from)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Deliver notifications. Never fails.
    pub(crate) fn dispatch(&self, notifications: &[Notification]) {
        for notification in notifications {
            if let Err(e) = self.notifier.notify(notification) {
                warn!(kind = ?notification.kind, error = %e, "notification dropped");
            }
        }
    }

    /// Deadline for a jury round starting at `from`.
    ///
    /// `Validation` when the configured window runs past the calendar.
    pub(crate) fn evaluation_deadline(&self, from: DateTime<Utc>) -> Result<DateTime<Utc>, WorkflowError> {
        let days = self.workflow.evaluation_window_days;
        add_business_days(from, days).ok_or_else(|| {
            WorkflowError::Validation(format!(
                "evaluation deadline {days} business days after {from} is out of range"
            ))
        })
    }

    pub(crate) fn defense_duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.workflow.defense_duration_minutes))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    use crate::error::WorkflowError;
    use crate::test_support::helpers::test_service;

    #[tokio::test]
    async fn deadline_counts_configured_business_days() {
        let (svc, _) = test_service().await;
        let friday = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        let deadline = svc.evaluation_deadline(friday).unwrap();
        assert_eq!(deadline, Utc.with_ymd_and_hms(2026, 11, 6, 9, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn deadline_past_calendar_end_is_rejected() {
        let (svc, _) = test_service().await;
        let late = DateTime::<Utc>::MAX_UTC - TimeDelta::days(2);
        let err = svc.evaluation_deadline(late).unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)), "got {err:?}");
    }
}
