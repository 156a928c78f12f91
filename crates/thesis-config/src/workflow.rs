//! Workflow timing and routing settings.

use serde::{Deserialize, Serialize};
use thesis_core::calendar::{CORRECTION_WINDOW_DAYS, EVALUATION_WINDOW_DAYS};
use thesis_core::schedule::DEFENSE_DURATION_MINUTES;

const fn default_evaluation_window_days() -> u32 {
    EVALUATION_WINDOW_DAYS
}

const fn default_correction_window_days() -> u32 {
    CORRECTION_WINDOW_DAYS
}

const fn default_defense_duration_minutes() -> u32 {
    DEFENSE_DURATION_MINUTES
}

fn default_reviewer_role() -> String {
    "reviewer".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Business days a jury has to evaluate a (re)submission.
    #[serde(default = "default_evaluation_window_days")]
    pub evaluation_window_days: u32,

    /// Business days students have to answer an observation. Loaded and
    /// validated but not applied by any transition.
    #[serde(default = "default_correction_window_days")]
    pub correction_window_days: u32,

    /// Length of a defense, used for schedule-conflict windows.
    #[serde(default = "default_defense_duration_minutes")]
    pub defense_duration_minutes: u32,

    /// Role notified when a thesis is submitted for review.
    #[serde(default = "default_reviewer_role")]
    pub reviewer_role: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            evaluation_window_days: default_evaluation_window_days(),
            correction_window_days: default_correction_window_days(),
            defense_duration_minutes: default_defense_duration_minutes(),
            reviewer_role: default_reviewer_role(),
        }
    }
}
