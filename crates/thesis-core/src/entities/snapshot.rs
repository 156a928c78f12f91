use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AdvisorType, DocumentType, HistoryAction, Phase, ThesisStatus};

use super::{
    Advisor, Author, DocumentDescriptor, JuryEvaluation, JuryMember, StatusHistoryEntry, Thesis,
};

/// Everything the workflow rules need to know about one thesis, loaded in a
/// single read.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ThesisSnapshot {
    pub thesis: Thesis,
    pub authors: Vec<Author>,
    pub advisors: Vec<Advisor>,
    /// Current documents only.
    pub documents: Vec<DocumentDescriptor>,
    /// Active and inactive seats for every phase.
    pub jury: Vec<JuryMember>,
    pub evaluations: Vec<JuryEvaluation>,
    /// Oldest first.
    pub history: Vec<StatusHistoryEntry>,
}

impl ThesisSnapshot {
    /// Jury phase the workflow is currently in: explicit in the stage when the
    /// status is phase-scoped, otherwise the thesis' recorded phase.
    #[must_use]
    pub fn active_phase(&self) -> Phase {
        self.thesis
            .stage()
            .jury_phase()
            .unwrap_or(self.thesis.current_phase)
    }

    /// Current document of `doc_type`, optionally owned by `owner`.
    #[must_use]
    pub fn current_document(
        &self,
        doc_type: DocumentType,
        owner: Option<&str>,
    ) -> Option<&DocumentDescriptor> {
        self.documents
            .iter()
            .filter(|d| d.is_current && d.doc_type == doc_type)
            .filter(|d| owner.is_none_or(|o| d.owner_id.as_deref() == Some(o)))
            .max_by_key(|d| d.created_at)
    }

    #[must_use]
    pub fn principal_advisor(&self) -> Option<&Advisor> {
        self.active_advisor(AdvisorType::Principal)
    }

    #[must_use]
    pub fn co_advisor(&self) -> Option<&Advisor> {
        self.active_advisor(AdvisorType::CoAdvisor)
    }

    fn active_advisor(&self, kind: AdvisorType) -> Option<&Advisor> {
        self.advisors
            .iter()
            .find(|a| a.is_active && a.advisor_type == kind)
    }

    /// Authors other than the principal author, in order.
    pub fn co_authors(&self) -> impl Iterator<Item = &Author> {
        self.authors.iter().filter(|a| !a.is_principal())
    }

    /// Timestamp of the most recent history entry that moved the thesis into
    /// `status`.
    #[must_use]
    pub fn entered_status_at(&self, status: ThesisStatus) -> Option<DateTime<Utc>> {
        self.history
            .iter()
            .filter(|h| h.new_status == status)
            .filter(|h| matches!(h.action, HistoryAction::Transition | HistoryAction::Override))
            .map(|h| h.created_at)
            .max()
    }

    /// Whether `user_id` is an author or an active advisor of this thesis.
    #[must_use]
    pub fn is_author_or_advisor(&self, user_id: &str) -> bool {
        self.authors.iter().any(|a| a.user_id == user_id)
            || self
                .advisors
                .iter()
                .any(|a| a.is_active && a.user_id == user_id)
    }
}
