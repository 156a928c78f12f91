use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DocumentType, SignatureStatus};

/// Descriptor of a stored document. The bytes live with the document
/// collaborator; the engine only reads type, currency, signature and age.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentDescriptor {
    pub id: String,
    pub thesis_id: String,
    pub doc_type: DocumentType,
    /// Person the document belongs to, for per-person types
    /// (advisor letters, author support documents).
    pub owner_id: Option<String>,
    pub file_name: String,
    pub is_current: bool,
    pub signature: SignatureStatus,
    pub created_at: DateTime<Utc>,
}

/// Input for attaching a document descriptor to a thesis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewDocument {
    pub doc_type: DocumentType,
    pub owner_id: Option<String>,
    pub file_name: String,
    #[serde(default = "unsigned")]
    pub signature: SignatureStatus,
}

const fn unsigned() -> SignatureStatus {
    SignatureStatus::Unsigned
}

impl NewDocument {
    #[must_use]
    pub fn new(doc_type: DocumentType, file_name: impl Into<String>) -> Self {
        Self {
            doc_type,
            owner_id: None,
            file_name: file_name.into(),
            signature: SignatureStatus::Unsigned,
        }
    }

    #[must_use]
    pub fn owned_by(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    #[must_use]
    pub const fn signed(mut self, signature: SignatureStatus) -> Self {
        self.signature = signature;
        self
    }
}
