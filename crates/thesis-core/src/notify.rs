//! Notification contract.
//!
//! The engine emits a [`Notification`] after a transition commits. Delivery is
//! fire-and-forget: a failed [`Notifier::notify`] is logged by the caller and
//! never rolls a transition back.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who should receive a notification.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum Audience {
    /// Specific users by ID.
    Users(Vec<String>),
    /// Everyone holding a role (e.g., clerical reviewers).
    Role(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SubmittedForReview,
    ReviewDecided,
    JuryAssigned,
    EvaluationRequested,
    RoundComplete,
    VerdictIssued,
    Resubmitted,
    FinalReportSubmitted,
    DefenseScheduled,
    Defended,
    StatusChanged,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Notification {
    pub audience: Audience,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}

impl Notification {
    #[must_use]
    pub fn new(
        audience: Audience,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            audience,
            kind,
            title: title.into(),
            message: message.into(),
            link: None,
        }
    }

    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Delivery failure reported by a notifier.
#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Outbound notification channel.
pub trait Notifier: Send + Sync {
    /// Deliver `notification`.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError` if delivery fails. Callers log and continue.
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}
