use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use thesis_core::enums::{ThesisStatus, TransitionKind};

use crate::cli::subcommands::{
    AdminCommands, AdvisorCommands, AuthorCommands, DeadlineCommands, DefenseCommands,
    DocumentCommands, EvaluationCommands, FinalReportCommands, JuryCommands, ReviewCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create a draft thesis.
    Create(CreateArgs),
    /// Get a thesis by ID.
    Get { id: String },
    /// List theses, newest first.
    List {
        #[arg(long)]
        status: Option<ThesisStatus>,
        #[arg(long)]
        include_deleted: bool,
    },
    /// Full aggregate: people, seats, documents, evaluations, history.
    Snapshot { id: String },
    /// Status history, oldest first.
    History { id: String },
    /// Evaluate the requirement checklist gating a transition.
    Checklist { id: String, kind: TransitionKind },
    /// Co-authors.
    Author {
        #[command(subcommand)]
        action: AuthorCommands,
    },
    /// Advisors.
    Advisor {
        #[command(subcommand)]
        action: AdvisorCommands,
    },
    /// Documents.
    Document {
        #[command(subcommand)]
        action: DocumentCommands,
    },
    /// Administrative review.
    Review {
        #[command(subcommand)]
        action: ReviewCommands,
    },
    /// Jury seats.
    Jury {
        #[command(subcommand)]
        action: JuryCommands,
    },
    /// Jury evaluations.
    Evaluation {
        #[command(subcommand)]
        action: EvaluationCommands,
    },
    /// Issue the jury verdict for the current round.
    Verdict(CommentArgs),
    /// Resubmit a jury-observed thesis for another round.
    Resubmit(CommentArgs),
    /// Final report phase.
    FinalReport {
        #[command(subcommand)]
        action: FinalReportCommands,
    },
    /// Defense scheduling.
    Defense {
        #[command(subcommand)]
        action: DefenseCommands,
    },
    /// Administrative overrides.
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
    /// Theses whose jury evaluation deadline has passed.
    Overdue {
        /// Reference instant (defaults to now)
        #[arg(long)]
        as_of: Option<DateTime<Utc>>,
    },
    /// Business-day calculator.
    Deadline {
        #[command(subcommand)]
        action: DeadlineCommands,
    },
    /// Print the JSON Schema of an entity or response type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long = "abstract")]
    pub abstract_text: Option<String>,
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,
    /// Principal author's user ID
    #[arg(long)]
    pub author: String,
}

#[derive(Clone, Debug, Args)]
pub struct CommentArgs {
    pub thesis: String,
    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name, e.g. thesis, snapshot, conflict-report
    pub type_name: String,
}
