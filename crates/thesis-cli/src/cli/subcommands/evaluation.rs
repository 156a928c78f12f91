use clap::Subcommand;
use thesis_core::enums::{EvaluationResult, Phase};

/// Juror evaluations.
#[derive(Clone, Debug, Subcommand)]
pub enum EvaluationCommands {
    /// Record a juror's evaluation of the current round.
    Submit {
        thesis: String,
        seat: String,
        #[arg(long)]
        result: EvaluationResult,
        /// Required when the result is OBSERVED
        #[arg(long)]
        observation: Option<String>,
        /// File name of a supporting document
        #[arg(long)]
        attachment: Option<String>,
    },
    /// List evaluations (defaults to the current phase and round).
    List {
        thesis: String,
        #[arg(long)]
        phase: Option<Phase>,
        #[arg(long)]
        round: Option<u32>,
    },
    /// Whether every required seat has evaluated.
    Complete {
        thesis: String,
        #[arg(long)]
        phase: Option<Phase>,
        #[arg(long)]
        round: Option<u32>,
    },
    /// Whether one seat has evaluated a round.
    Done {
        seat: String,
        #[arg(long)]
        round: u32,
    },
}
