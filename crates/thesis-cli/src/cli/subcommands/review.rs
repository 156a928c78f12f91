use clap::Subcommand;

/// Administrative review.
#[derive(Clone, Debug, Subcommand)]
pub enum ReviewCommands {
    /// Submit a draft for review.
    Submit { thesis: String },
    /// Approve a thesis under review; it moves to jury assignment.
    Approve {
        thesis: String,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Send a thesis under review back with observations.
    Observe {
        thesis: String,
        #[arg(long)]
        comment: String,
    },
    /// Resubmit an observed thesis for review.
    Resubmit { thesis: String },
}
