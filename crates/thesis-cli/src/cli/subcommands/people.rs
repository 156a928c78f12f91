use clap::Subcommand;
use thesis_core::enums::AdvisorType;

/// Co-author invitations.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthorCommands {
    /// Invite a co-author.
    Add { thesis: String, user: String },
    /// Accept a co-authorship invitation.
    Accept { thesis: String, user: String },
    /// Decline a co-authorship invitation.
    Decline { thesis: String, user: String },
}

/// Advisor invitations.
#[derive(Clone, Debug, Subcommand)]
pub enum AdvisorCommands {
    /// Invite an advisor (PRINCIPAL or CO_ADVISOR).
    Add {
        thesis: String,
        user: String,
        #[arg(long = "type", default_value = "PRINCIPAL")]
        advisor_type: AdvisorType,
    },
    /// Accept an advisor invitation.
    Accept { thesis: String, user: String },
    /// Decline an advisor invitation.
    Decline { thesis: String, user: String },
}
