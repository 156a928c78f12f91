//! Aggregate setup: thesis creation, people, documents.
//!
//! These writes do not change status and write no history entry.

use chrono::Utc;
use thesis_core::entities::{
    Advisor, Author, DocumentDescriptor, NewDocument, Thesis, ThesisSnapshot,
};
use thesis_core::enums::{AcceptanceState, AdvisorType, Phase, SignatureStatus, ThesisStatus};
use thesis_core::identity::Principal;
use thesis_core::ids::{PREFIX_ADVISOR, PREFIX_AUTHOR, PREFIX_DOCUMENT, PREFIX_THESIS};
use tracing::info;

use crate::error::WorkflowError;
use crate::helpers::generate_id;
use crate::repos::{documents, people, thesis as thesis_repo};
use crate::repos::snapshot::load_snapshot;
use crate::service::ThesisService;
use crate::updates::ThesisUpdateBuilder;

use super::{non_blank, require_live, require_status};

/// Statuses in which authors and advisors may still change.
const EDITABLE: &[ThesisStatus] = &[ThesisStatus::Draft, ThesisStatus::Observed];

/// A user may hold only one relation to a thesis: author, advisor or juror.
fn ensure_unattached(snapshot: &ThesisSnapshot, user_id: &str) -> Result<(), WorkflowError> {
    let thesis_id = &snapshot.thesis.id;
    if snapshot.authors.iter().any(|a| a.user_id == user_id) {
        return Err(WorkflowError::Conflict(format!(
            "user {user_id} is already an author of thesis {thesis_id}"
        )));
    }
    if snapshot
        .advisors
        .iter()
        .any(|a| a.is_active && a.user_id == user_id)
    {
        return Err(WorkflowError::Conflict(format!(
            "user {user_id} is already an advisor of thesis {thesis_id}"
        )));
    }
    if let Some(seat) = snapshot
        .jury
        .iter()
        .find(|s| s.is_active && s.user_id == user_id)
    {
        return Err(WorkflowError::Conflict(format!(
            "user {user_id} holds the {} jury seat for phase {} of thesis {thesis_id}",
            seat.role, seat.phase
        )));
    }
    Ok(())
}

fn required_text<'a>(value: &'a str, field: &str) -> Result<&'a str, WorkflowError> {
    non_blank(Some(value)).ok_or_else(|| WorkflowError::Validation(format!("{field} must not be empty")))
}

impl ThesisService {
    /// Create a `DRAFT` thesis in round 1 of the `PROJECT` phase with
    /// `principal_author` as accepted author number 1.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Validation` for a blank title or author.
    pub async fn create_thesis(
        &self,
        title: &str,
        abstract_text: Option<&str>,
        keywords: &[String],
        principal_author: &str,
        actor: &Principal,
    ) -> Result<Thesis, WorkflowError> {
        let title = required_text(title, "title")?;
        let principal_author = required_text(principal_author, "principal author")?;

        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let now = Utc::now();
            let thesis = Thesis {
                id: generate_id(&tx, PREFIX_THESIS).await?,
                title: title.to_string(),
                abstract_text: non_blank(abstract_text).map(String::from),
                keywords: keywords
                    .iter()
                    .filter_map(|k| non_blank(Some(k.as_str())).map(String::from))
                    .collect(),
                status: ThesisStatus::Draft,
                current_round: 1,
                current_phase: Phase::Project,
                evaluation_deadline: None,
                correction_deadline: None,
                defense_at: None,
                defense_venue: None,
                voucher_handoff_confirmed: false,
                deleted_at: None,
                created_at: now,
                updated_at: now,
            };
            thesis_repo::insert_thesis(&tx, &thesis).await?;
            people::insert_author(
                &tx,
                &Author {
                    id: generate_id(&tx, PREFIX_AUTHOR).await?,
                    thesis_id: thesis.id.clone(),
                    user_id: principal_author.to_string(),
                    position: 1,
                    acceptance: AcceptanceState::Accepted,
                    created_at: now,
                },
            )
            .await?;
            Ok(thesis)
        }
        .await;
        let thesis = Self::finish(tx, result).await?;
        info!(thesis = %thesis.id, actor = %actor.id, "thesis created");
        Ok(thesis)
    }

    /// Invite `user_id` as the next co-author, `PENDING` until they respond.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside `DRAFT`/`OBSERVED`; `Conflict` if the user
    /// already has a role on the thesis.
    pub async fn add_co_author(&self, thesis_id: &str, user_id: &str) -> Result<Author, WorkflowError> {
        let user_id = required_text(user_id, "user id")?;
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_status(&snapshot.thesis, EDITABLE, "add co-author")?;
            ensure_unattached(&snapshot, user_id)?;

            let position = snapshot.authors.iter().map(|a| a.position).max().unwrap_or(0) + 1;
            let author = Author {
                id: generate_id(&tx, PREFIX_AUTHOR).await?,
                thesis_id: thesis_id.to_string(),
                user_id: user_id.to_string(),
                position,
                acceptance: AcceptanceState::Pending,
                created_at: Utc::now(),
            };
            people::insert_author(&tx, &author).await?;
            Ok(author)
        }
        .await;
        Self::finish(tx, result).await
    }

    /// Record a co-author's answer to their invitation.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user is not an author; `InvalidState` if they have
    /// already answered.
    pub async fn respond_co_author(
        &self,
        thesis_id: &str,
        user_id: &str,
        accept: bool,
    ) -> Result<Author, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_live(&snapshot.thesis)?;
            let author = snapshot
                .authors
                .iter()
                .find(|a| a.user_id == user_id)
                .ok_or_else(|| WorkflowError::not_found("author", user_id))?;
            if author.acceptance != AcceptanceState::Pending {
                return Err(WorkflowError::InvalidState(format!(
                    "author {user_id} already answered: {}",
                    author.acceptance
                )));
            }
            let acceptance = if accept {
                AcceptanceState::Accepted
            } else {
                AcceptanceState::Rejected
            };
            people::set_author_acceptance(&tx, &author.id, acceptance).await?;
            Ok(Author {
                acceptance,
                ..author.clone()
            })
        }
        .await;
        Self::finish(tx, result).await
    }

    /// Invite an advisor. At most one active advisor of each type.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside `DRAFT`/`OBSERVED`; `Conflict` if the type is
    /// taken or the user already has a role on the thesis.
    pub async fn add_advisor(
        &self,
        thesis_id: &str,
        user_id: &str,
        advisor_type: AdvisorType,
    ) -> Result<Advisor, WorkflowError> {
        let user_id = required_text(user_id, "user id")?;
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_status(&snapshot.thesis, EDITABLE, "add advisor")?;
            ensure_unattached(&snapshot, user_id)?;
            if let Some(existing) = snapshot
                .advisors
                .iter()
                .find(|a| a.is_active && a.advisor_type == advisor_type)
            {
                return Err(WorkflowError::Conflict(format!(
                    "thesis {thesis_id} already has an active {advisor_type} advisor: {}",
                    existing.user_id
                )));
            }

            let advisor = Advisor {
                id: generate_id(&tx, PREFIX_ADVISOR).await?,
                thesis_id: thesis_id.to_string(),
                user_id: user_id.to_string(),
                advisor_type,
                acceptance: AcceptanceState::Pending,
                is_active: true,
                created_at: Utc::now(),
            };
            people::insert_advisor(&tx, &advisor).await?;
            Ok(advisor)
        }
        .await;
        Self::finish(tx, result).await
    }

    /// Record an advisor's answer. A rejection frees the advisor slot.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user is not an active advisor; `InvalidState` if they
    /// have already answered.
    pub async fn respond_advisor(
        &self,
        thesis_id: &str,
        user_id: &str,
        accept: bool,
    ) -> Result<Advisor, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let snapshot = load_snapshot(&tx, thesis_id).await?;
            require_live(&snapshot.thesis)?;
            let advisor = snapshot
                .advisors
                .iter()
                .find(|a| a.is_active && a.user_id == user_id)
                .ok_or_else(|| WorkflowError::not_found("advisor", user_id))?;
            if advisor.acceptance != AcceptanceState::Pending {
                return Err(WorkflowError::InvalidState(format!(
                    "advisor {user_id} already answered: {}",
                    advisor.acceptance
                )));
            }
            let acceptance = if accept {
                AcceptanceState::Accepted
            } else {
                AcceptanceState::Rejected
            };
            people::set_advisor_acceptance(&tx, &advisor.id, acceptance).await?;
            Ok(Advisor {
                acceptance,
                is_active: accept,
                ..advisor.clone()
            })
        }
        .await;
        Self::finish(tx, result).await
    }

    /// Attach a document descriptor as the current version of its
    /// (type, owner), superseding the previous one.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank file name, a missing owner on a per-person
    /// type, or an owner on a shared type; `InvalidState` if deleted.
    pub async fn attach_document(
        &self,
        thesis_id: &str,
        doc: &NewDocument,
    ) -> Result<DocumentDescriptor, WorkflowError> {
        let file_name = required_text(&doc.file_name, "file name")?;
        let owner = non_blank(doc.owner_id.as_deref());
        match (doc.doc_type.is_owned(), owner) {
            (true, None) => {
                return Err(WorkflowError::Validation(format!(
                    "{} documents need an owner",
                    doc.doc_type
                )));
            }
            (false, Some(_)) => {
                return Err(WorkflowError::Validation(format!(
                    "{} documents belong to the thesis, not a person",
                    doc.doc_type
                )));
            }
            _ => {}
        }

        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let thesis = thesis_repo::fetch_thesis(&tx, thesis_id).await?;
            require_live(&thesis)?;
            let descriptor = DocumentDescriptor {
                id: generate_id(&tx, PREFIX_DOCUMENT).await?,
                thesis_id: thesis_id.to_string(),
                doc_type: doc.doc_type,
                owner_id: owner.map(String::from),
                file_name: file_name.to_string(),
                is_current: true,
                signature: doc.signature,
                created_at: Utc::now(),
            };
            documents::insert_document(&tx, &descriptor).await?;
            Ok(descriptor)
        }
        .await;
        Self::finish(tx, result).await
    }

    /// Record the signature state reported by the signing collaborator.
    ///
    /// # Errors
    ///
    /// `NotFound` if the document does not exist; `InvalidState` if its
    /// thesis is deleted.
    pub async fn mark_document_signed(
        &self,
        document_id: &str,
        signature: SignatureStatus,
    ) -> Result<DocumentDescriptor, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let doc = documents::fetch_document(&tx, document_id).await?;
            let thesis = thesis_repo::fetch_thesis(&tx, &doc.thesis_id).await?;
            require_live(&thesis)?;
            documents::set_signature(&tx, document_id, signature).await?;
            Ok(DocumentDescriptor { signature, ..doc })
        }
        .await;
        Self::finish(tx, result).await
    }

    /// Confirm the students handed the physical payment voucher over.
    ///
    /// # Errors
    ///
    /// `NotFound` or `InvalidState` if the thesis is missing or deleted.
    pub async fn confirm_voucher_handoff(&self, thesis_id: &str) -> Result<Thesis, WorkflowError> {
        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let thesis = thesis_repo::fetch_thesis(&tx, thesis_id).await?;
            require_live(&thesis)?;
            let update = ThesisUpdateBuilder::new()
                .voucher_handoff_confirmed(true)
                .build();
            thesis_repo::update_thesis(&tx, thesis_id, thesis.status, &update, Utc::now()).await?;
            thesis_repo::fetch_thesis(&tx, thesis_id).await
        }
        .await;
        Self::finish(tx, result).await
    }
}
