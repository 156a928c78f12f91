//! Phase-carrying view of a thesis status.
//!
//! The persisted status is the flat [`ThesisStatus`] enum. Four pairs of
//! statuses differ only by the jury phase they belong to (`ASSIGNING_JURY` /
//! `FINAL_REPORT`, `EVALUATING_JURY` / `EVALUATING_REPORT`, and so on).
//! [`Stage`] folds each pair into one variant that carries its [`Phase`], so
//! the engine never has to infer a phase from a status name.
//!
//! ```text
//! ThesisStatus          Stage
//! ASSIGNING_JURY        JurySeating(PROJECT)
//! FINAL_REPORT          JurySeating(FINAL_REPORT)
//! EVALUATING_JURY       JuryEvaluating(PROJECT)
//! EVALUATING_REPORT     JuryEvaluating(FINAL_REPORT)
//! JURY_OBSERVED         JuryObserved(PROJECT)
//! REPORT_OBSERVED       JuryObserved(FINAL_REPORT)
//! PROJECT_APPROVED      PhaseApproved(PROJECT)
//! APPROVED              PhaseApproved(FINAL_REPORT)
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Phase, ThesisStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "stage", content = "phase", rename_all = "snake_case")]
pub enum Stage {
    Draft,
    InReview,
    ReviewObserved,
    /// Jury seats may be assigned or removed.
    JurySeating(Phase),
    /// Jurors submit evaluations for the current round.
    JuryEvaluating(Phase),
    /// The jury observed the manuscript; students must resubmit.
    JuryObserved(Phase),
    PhaseApproved(Phase),
    Defending,
    Defended,
    Archived,
    Rejected,
}

impl Stage {
    /// Jury phase scoped by this stage, if any.
    #[must_use]
    pub const fn jury_phase(self) -> Option<Phase> {
        match self {
            Self::JurySeating(p)
            | Self::JuryEvaluating(p)
            | Self::JuryObserved(p)
            | Self::PhaseApproved(p) => Some(p),
            Self::Draft
            | Self::InReview
            | Self::ReviewObserved
            | Self::Defending
            | Self::Defended
            | Self::Archived
            | Self::Rejected => None,
        }
    }

    #[must_use]
    pub const fn status(self) -> ThesisStatus {
        match self {
            Self::Draft => ThesisStatus::Draft,
            Self::InReview => ThesisStatus::InReview,
            Self::ReviewObserved => ThesisStatus::Observed,
            Self::JurySeating(Phase::Project) => ThesisStatus::AssigningJury,
            Self::JurySeating(Phase::FinalReport) => ThesisStatus::FinalReport,
            Self::JuryEvaluating(Phase::Project) => ThesisStatus::EvaluatingJury,
            Self::JuryEvaluating(Phase::FinalReport) => ThesisStatus::EvaluatingReport,
            Self::JuryObserved(Phase::Project) => ThesisStatus::JuryObserved,
            Self::JuryObserved(Phase::FinalReport) => ThesisStatus::ReportObserved,
            Self::PhaseApproved(Phase::Project) => ThesisStatus::ProjectApproved,
            Self::PhaseApproved(Phase::FinalReport) => ThesisStatus::Approved,
            Self::Defending => ThesisStatus::Defending,
            Self::Defended => ThesisStatus::Defended,
            Self::Archived => ThesisStatus::Archived,
            Self::Rejected => ThesisStatus::Rejected,
        }
    }
}

impl From<ThesisStatus> for Stage {
    fn from(status: ThesisStatus) -> Self {
        match status {
            ThesisStatus::Draft => Self::Draft,
            ThesisStatus::InReview => Self::InReview,
            ThesisStatus::Observed => Self::ReviewObserved,
            ThesisStatus::AssigningJury => Self::JurySeating(Phase::Project),
            ThesisStatus::FinalReport => Self::JurySeating(Phase::FinalReport),
            ThesisStatus::EvaluatingJury => Self::JuryEvaluating(Phase::Project),
            ThesisStatus::EvaluatingReport => Self::JuryEvaluating(Phase::FinalReport),
            ThesisStatus::JuryObserved => Self::JuryObserved(Phase::Project),
            ThesisStatus::ReportObserved => Self::JuryObserved(Phase::FinalReport),
            ThesisStatus::ProjectApproved => Self::PhaseApproved(Phase::Project),
            ThesisStatus::Approved => Self::PhaseApproved(Phase::FinalReport),
            ThesisStatus::Defending => Self::Defending,
            ThesisStatus::Defended => Self::Defended,
            ThesisStatus::Archived => Self::Archived,
            ThesisStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<Stage> for ThesisStatus {
    fn from(stage: Stage) -> Self {
        stage.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_stage_bijection() {
        for status in ThesisStatus::ALL {
            assert_eq!(Stage::from(*status).status(), *status);
        }
    }

    #[test]
    fn jury_phase_is_explicit() {
        assert_eq!(
            Stage::from(ThesisStatus::FinalReport).jury_phase(),
            Some(Phase::FinalReport)
        );
        assert_eq!(
            Stage::from(ThesisStatus::AssigningJury).jury_phase(),
            Some(Phase::Project)
        );
        assert_eq!(
            Stage::from(ThesisStatus::EvaluatingReport).jury_phase(),
            Some(Phase::FinalReport)
        );
        assert_eq!(Stage::from(ThesisStatus::InReview).jury_phase(), None);
        assert_eq!(Stage::from(ThesisStatus::Defending).jury_phase(), None);
    }

    #[test]
    fn stage_serializes_with_phase() {
        let json = serde_json::to_value(Stage::JuryObserved(Phase::FinalReport)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"stage": "jury_observed", "phase": "FINAL_REPORT"})
        );
    }
}
