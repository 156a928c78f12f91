//! Defense scheduling and the closing defense record.

use chrono::{DateTime, Utc};
use thesis_core::entities::Thesis;
use thesis_core::enums::{HistoryAction, Phase, ThesisStatus};
use thesis_core::identity::Principal;
use thesis_core::notify::{Notification, NotificationKind};
use thesis_core::responses::DefenseScheduled;
use thesis_core::roster;
use thesis_core::schedule::{ConflictReport, DefenseSlot, detect_conflicts};
use tracing::warn;

use crate::error::WorkflowError;
use crate::repos::jury::list_members;
use crate::repos::schedule::same_day_defenses;
use crate::repos::snapshot::load_snapshot;
use crate::service::ThesisService;
use crate::updates::ThesisUpdateBuilder;

use super::{commit_change, jurors, link, non_blank, require_status, students_and_advisors};

impl ThesisService {
    async fn conflicts_for(
        &self,
        conn: &libsql::Connection,
        candidate: &DefenseSlot,
    ) -> Result<ConflictReport, WorkflowError> {
        let mut slot = candidate.clone();
        if let Some(thesis_id) = candidate.thesis_id.as_deref() {
            for seat in list_members(conn, thesis_id, Some(Phase::FinalReport)).await? {
                if seat.is_active && !slot.jurors.contains(&seat.user_id) {
                    slot.jurors.push(seat.user_id);
                }
            }
        }
        let duration = self.defense_duration();
        let existing = same_day_defenses(
            conn,
            slot.start.date_naive(),
            slot.thesis_id.as_deref(),
            duration,
        )
        .await?;
        Ok(detect_conflicts(&slot, &existing, duration))
    }

    /// Check a candidate slot against the defenses already booked that day.
    ///
    /// When the slot names a thesis, its final-report jurors are added to the
    /// candidate's jurors. Read-only and advisory.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Database` if the query fails.
    pub async fn find_schedule_conflicts(&self, candidate: &DefenseSlot) -> Result<ConflictReport, WorkflowError> {
        let _guard = self.guard().await;
        self.conflicts_for(self.db().conn(), candidate).await
    }

    /// `APPROVED` → `DEFENDING`, booking `start` at `venue`.
    ///
    /// Conflicts are logged and returned with the thesis; they never block.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside `APPROVED`; `Validation` for a blank venue.
    pub async fn schedule_defense(
        &self,
        thesis_id: &str,
        start: DateTime<Utc>,
        venue: &str,
        actor: &Principal,
    ) -> Result<DefenseScheduled, WorkflowError> {
        let venue = non_blank(Some(venue))
            .ok_or_else(|| WorkflowError::Validation("defense venue must not be empty".into()))?;

        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_status(&snapshot.thesis, &[ThesisStatus::Approved], "schedule defense")?;

            let candidate = DefenseSlot {
                thesis_id: Some(thesis_id.to_string()),
                start,
                venue: Some(venue.to_string()),
                jurors: roster::active_seats(&snapshot.jury, Phase::FinalReport)
                    .map(|s| s.user_id.clone())
                    .collect(),
            };
            let report = self.conflicts_for(&tx, &candidate).await?;
            for conflict in &report.conflicts {
                warn!(
                    thesis = %thesis_id,
                    other = %conflict.thesis_id,
                    kind = ?conflict.kind,
                    venue = conflict.venue.as_deref().unwrap_or(""),
                    juror = conflict.juror_id.as_deref().unwrap_or(""),
                    "defense schedule conflict"
                );
            }

            let update = ThesisUpdateBuilder::new()
                .status(ThesisStatus::Defending)
                .defense_at(Some(start))
                .defense_venue(Some(venue.to_string()))
                .build();
            let comment = format!("Defense at {venue} on {}", start.format("%Y-%m-%d %H:%M UTC"));
            let thesis = commit_change(
                &tx,
                &snapshot.thesis,
                &update,
                HistoryAction::Transition,
                Some(&comment),
                actor,
                Utc::now(),
            )
            .await?;

            let message = format!(
                "The defense of \"{}\" is scheduled for {} at {venue}",
                thesis.title,
                start.format("%Y-%m-%d %H:%M UTC")
            );
            let notes = vec![
                Notification::new(
                    students_and_advisors(&snapshot),
                    NotificationKind::DefenseScheduled,
                    "Defense scheduled",
                    message.clone(),
                )
                .with_link(link(&thesis.id)),
                Notification::new(
                    jurors(&snapshot, Phase::FinalReport),
                    NotificationKind::DefenseScheduled,
                    "Defense scheduled",
                    message,
                )
                .with_link(link(&thesis.id)),
            ];
            Ok((DefenseScheduled { thesis, report }, notes))
        }
        .await;
        let (scheduled, notes) = Self::finish(tx, result).await?;
        self.dispatch(&notes);
        Ok(scheduled)
    }

    /// `DEFENDING` → `DEFENDED`.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside `DEFENDING`.
    pub async fn record_defense(
        &self,
        thesis_id: &str,
        comment: Option<&str>,
        actor: &Principal,
    ) -> Result<Thesis, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_status(&snapshot.thesis, &[ThesisStatus::Defending], "record defense")?;
            let update = ThesisUpdateBuilder::new().status(ThesisStatus::Defended).build();
            let thesis = commit_change(&tx, &snapshot.thesis, &update, HistoryAction::Transition, comment, actor, Utc::now()).await?;
            let note = Notification::new(
                students_and_advisors(&snapshot),
                NotificationKind::Defended,
                "Defense recorded",
                format!("\"{}\" has been defended", thesis.title),
            )
            .with_link(link(&thesis.id));
            Ok((thesis, vec![note]))
        }
        .await;
        let (thesis, notes) = Self::finish(tx, result).await?;
        self.dispatch(&notes);
        Ok(thesis)
    }
}
