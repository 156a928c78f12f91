use clap::Subcommand;
use thesis_core::enums::{DocumentType, SignatureStatus};

/// Document descriptors.
#[derive(Clone, Debug, Subcommand)]
pub enum DocumentCommands {
    /// Attach a new document version; the previous version is retired.
    Attach {
        thesis: String,
        #[arg(long = "type")]
        doc_type: DocumentType,
        #[arg(long)]
        file: String,
        /// Owner for per-person documents (advisor letters, jury opinions)
        #[arg(long)]
        owner: Option<String>,
        #[arg(long, default_value = "UNSIGNED")]
        signature: SignatureStatus,
    },
    /// Record a signature on a document.
    Sign {
        document: String,
        #[arg(long)]
        status: SignatureStatus,
    },
    /// List documents of a thesis.
    List {
        thesis: String,
        /// Include retired versions
        #[arg(long)]
        all: bool,
    },
    /// Confirm the physical payment voucher was handed in.
    Handoff { thesis: String },
}
