use clap::Subcommand;
use thesis_core::enums::ThesisStatus;

/// Administrative overrides.
#[derive(Clone, Debug, Subcommand)]
pub enum AdminCommands {
    /// Force a status, bypassing the workflow edges.
    Status {
        thesis: String,
        status: ThesisStatus,
        #[arg(long)]
        comment: String,
    },
    /// Soft-delete a thesis.
    Delete {
        thesis: String,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Restore a soft-deleted thesis.
    Restore {
        thesis: String,
        #[arg(long)]
        comment: Option<String>,
    },
}
