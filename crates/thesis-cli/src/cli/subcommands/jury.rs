use clap::Subcommand;
use thesis_core::enums::{JuryRole, Phase};

/// Jury seats.
#[derive(Clone, Debug, Subcommand)]
pub enum JuryCommands {
    /// Seat a user in the current phase's jury.
    Assign {
        thesis: String,
        user: String,
        #[arg(long)]
        role: JuryRole,
    },
    /// Deactivate a seat.
    Remove { thesis: String, seat: String },
    /// Close seating and open jury evaluation.
    Start { thesis: String },
    /// List seats of a phase (defaults to the thesis's current phase).
    Seats {
        thesis: String,
        #[arg(long)]
        phase: Option<Phase>,
    },
}
