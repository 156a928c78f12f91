//! Jury evaluation submission and round-completion detection.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thesis_core::entities::{DocumentDescriptor, JuryEvaluation};
use thesis_core::enums::{DocumentType, EvaluationResult, JuryRole, SignatureStatus};
use thesis_core::identity::Principal;
use thesis_core::ids::{PREFIX_DOCUMENT, PREFIX_EVALUATION};
use thesis_core::notify::{Audience, Notification, NotificationKind};
use thesis_core::responses::EvaluationReceipt;
use thesis_core::roster;
use thesis_core::stage::Stage;
use tracing::info;

use crate::error::WorkflowError;
use crate::helpers::generate_id;
use crate::repos::documents::insert_document;
use crate::repos::evaluations::{exists_for_round, insert_evaluation, list_evaluations};
use crate::repos::jury::{fetch_member, list_members};
use crate::repos::thesis::fetch_thesis;
use crate::service::ThesisService;

use super::{link, non_blank, require_live};

/// A juror's evaluation of the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSubmission {
    pub result: EvaluationResult,
    /// Required when `result` is `OBSERVED`.
    #[serde(default)]
    pub observation: Option<String>,
    /// File name of an optional supporting document.
    #[serde(default)]
    pub attachment: Option<String>,
}

impl EvaluationSubmission {
    #[must_use]
    pub const fn approved() -> Self {
        Self {
            result: EvaluationResult::Approved,
            observation: None,
            attachment: None,
        }
    }

    #[must_use]
    pub fn observed(observation: impl Into<String>) -> Self {
        Self {
            result: EvaluationResult::Observed,
            observation: Some(observation.into()),
            attachment: None,
        }
    }

    #[must_use]
    pub fn with_attachment(mut self, file_name: impl Into<String>) -> Self {
        self.attachment = Some(file_name.into());
        self
    }
}

impl ThesisService {
    /// Record one seat's evaluation for the thesis' current round.
    ///
    /// Does not change the thesis status. The receipt reports whether the
    /// round is now complete; when it is, the jury president is notified so
    /// the dictamen can be issued.
    ///
    /// # Errors
    ///
    /// - `InvalidState` outside an evaluating status, or for an inactive seat
    ///   or a seat of another phase
    /// - `NotFound` if the seat does not belong to the thesis
    /// - `Validation` for `OBSERVED` without observation text
    /// - `Conflict` if the seat already evaluated this round
    pub async fn submit_evaluation(
        &self,
        thesis_id: &str,
        jury_member_id: &str,
        submission: &EvaluationSubmission,
        actor: &Principal,
    ) -> Result<EvaluationReceipt, WorkflowError> {
        let observation = non_blank(submission.observation.as_deref()).map(String::from);
        if submission.result == EvaluationResult::Observed && observation.is_none() {
            return Err(WorkflowError::Validation(
                "an OBSERVED evaluation requires observation text".into(),
            ));
        }
        let attachment = non_blank(submission.attachment.as_deref()).map(String::from);

        let _guard = self.guard().await;
        let tx = self.begin().await?;
        let result: Result<_, WorkflowError> = async {
            let thesis = fetch_thesis(&tx, thesis_id).await?;
            require_live(&thesis)?;
            let Stage::JuryEvaluating(phase) = thesis.stage() else {
                return Err(WorkflowError::InvalidState(format!(
                    "submit evaluation requires status EVALUATING_JURY or EVALUATING_REPORT; thesis {thesis_id} is {}",
                    thesis.status
                )));
            };

            let seat = fetch_member(&tx, jury_member_id).await?;
            if seat.thesis_id != thesis_id {
                return Err(WorkflowError::not_found("jury seat", jury_member_id));
            }
            if !seat.is_active {
                return Err(WorkflowError::InvalidState(format!(
                    "jury seat {jury_member_id} is inactive"
                )));
            }
            if seat.phase != phase {
                return Err(WorkflowError::InvalidState(format!(
                    "jury seat {jury_member_id} belongs to phase {}, thesis is evaluating {phase}",
                    seat.phase
                )));
            }
            let round = thesis.current_round;
            if exists_for_round(&tx, jury_member_id, round).await? {
                return Err(WorkflowError::Conflict(format!(
                    "jury seat {jury_member_id} already evaluated round {round}"
                )));
            }

            let now = Utc::now();
            let document_id = match attachment.as_deref() {
                Some(file_name) => {
                    let doc = DocumentDescriptor {
                        id: generate_id(&tx, PREFIX_DOCUMENT).await?,
                        thesis_id: thesis_id.to_string(),
                        doc_type: DocumentType::EvaluationAttachment,
                        owner_id: Some(seat.user_id.clone()),
                        file_name: file_name.to_string(),
                        is_current: true,
                        signature: SignatureStatus::Unsigned,
                        created_at: now,
                    };
                    insert_document(&tx, &doc).await?;
                    Some(doc.id)
                }
                None => None,
            };

            let evaluation = JuryEvaluation {
                id: generate_id(&tx, PREFIX_EVALUATION).await?,
                thesis_id: thesis_id.to_string(),
                jury_member_id: jury_member_id.to_string(),
                phase,
                round,
                result: submission.result,
                observation: observation.clone(),
                document_id,
                created_at: now,
            };
            insert_evaluation(&tx, &evaluation).await?;

            let seats = list_members(&tx, thesis_id, Some(phase)).await?;
            let evaluations = list_evaluations(&tx, thesis_id, Some(phase), Some(round)).await?;
            let round_complete = roster::is_round_complete(&seats, &evaluations, phase, round);
            info!(
                thesis = %thesis_id,
                seat = %jury_member_id,
                result = %evaluation.result,
                round,
                round_complete,
                actor = %actor.id,
                "evaluation submitted"
            );

            let mut notes = Vec::new();
            if round_complete {
                if let Some(president) = roster::seat_holder(&seats, phase, JuryRole::President) {
                    notes.push(
                        Notification::new(
                            Audience::Users(vec![president.user_id.clone()]),
                            NotificationKind::RoundComplete,
                            "Evaluation round complete",
                            format!(
                                "Every required juror evaluated round {round} of \"{}\"; the dictamen can be issued",
                                thesis.title
                            ),
                        )
                        .with_link(link(thesis_id)),
                    );
                }
            }
            Ok((
                EvaluationReceipt {
                    evaluation,
                    round_complete,
                },
                notes,
            ))
        }
        .await;
        let (receipt, notes) = Self::finish(tx, result).await?;
        self.dispatch(&notes);
        Ok(receipt)
    }
}
