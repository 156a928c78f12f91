//! Read-only listing of jury rounds past their evaluation deadline.
//!
//! Nothing is enforced: an overdue round stays open until the jury finishes.

use chrono::{DateTime, Utc};
use thesis_core::calendar::business_days_between;
use thesis_core::responses::OverdueEvaluation;

use crate::error::WorkflowError;
use crate::helpers::ts;
use crate::repos::thesis::{SELECT_COLS, row_to_thesis};
use crate::service::ThesisService;

impl ThesisService {
    /// Live theses in `EVALUATING_JURY`/`EVALUATING_REPORT` whose deadline
    /// is before `as_of`, earliest deadline first.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Database` if the query fails.
    pub async fn overdue_evaluations(&self, as_of: DateTime<Utc>) -> Result<Vec<OverdueEvaluation>, WorkflowError> {
        let _guard = self.guard().await;
        let sql = format!(
            "SELECT {SELECT_COLS} FROM theses
             WHERE deleted_at IS NULL
               AND status IN ('EVALUATING_JURY', 'EVALUATING_REPORT')
               AND evaluation_deadline IS NOT NULL
               AND evaluation_deadline < ?1
             ORDER BY evaluation_deadline, rowid"
        );
        let mut rows = self.db().conn().query(&sql, [ts(as_of)]).await?;

        let mut overdue = Vec::new();
        while let Some(row) = rows.next().await? {
            let thesis = row_to_thesis(&row)?;
            let Some(deadline) = thesis.evaluation_deadline else {
                continue;
            };
            overdue.push(OverdueEvaluation {
                business_days_overdue: business_days_between(deadline.date_naive(), as_of.date_naive()),
                thesis_id: thesis.id,
                title: thesis.title,
                status: thesis.status,
                round: thesis.current_round,
                deadline,
            });
        }
        Ok(overdue)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use pretty_assertions::assert_eq;
    use thesis_core::calendar::add_business_days;
    use thesis_core::enums::ThesisStatus;

    use crate::test_support::helpers::*;

    #[tokio::test]
    async fn nothing_is_overdue_before_the_deadline() {
        let (svc, _) = test_service().await;
        evaluating_jury(&svc).await;
        assert!(svc.overdue_evaluations(Utc::now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lists_rounds_past_deadline_with_business_days() {
        let (svc, _) = test_service().await;
        let (thesis, _) = evaluating_jury(&svc).await;
        let deadline = thesis.evaluation_deadline.unwrap();

        let as_of = add_business_days(deadline, 3).unwrap() + TimeDelta::minutes(1);
        let overdue = svc.overdue_evaluations(as_of).await.unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].thesis_id, thesis.id);
        assert_eq!(overdue[0].status, ThesisStatus::EvaluatingJury);
        assert_eq!(overdue[0].round, 1);
        assert_eq!(overdue[0].deadline, deadline);
        assert_eq!(overdue[0].business_days_overdue, 3);
    }

    #[tokio::test]
    async fn deleted_and_decided_theses_are_skipped() {
        let (svc, _) = test_service().await;
        let (deleted, _) = evaluating_jury(&svc).await;
        svc.delete_thesis(&deleted.id, None, &admin()).await.unwrap();
        let decided = project_approved(&svc).await;
        assert_eq!(decided.status, ThesisStatus::ProjectApproved);

        let far = Utc::now() + TimeDelta::days(90);
        assert!(svc.overdue_evaluations(far).await.unwrap().is_empty());
    }
}
