use chrono::{DateTime, Utc};
use clap::Subcommand;

/// Defense scheduling.
#[derive(Clone, Debug, Subcommand)]
pub enum DefenseCommands {
    /// Check a candidate slot against the calendar.
    Conflicts {
        /// RFC 3339 start, e.g. 2026-11-20T15:00:00Z
        #[arg(long)]
        start: DateTime<Utc>,
        #[arg(long)]
        venue: Option<String>,
        /// Thesis being scheduled; its seated jurors are included
        #[arg(long)]
        thesis: Option<String>,
        #[arg(long = "juror")]
        jurors: Vec<String>,
    },
    /// Schedule the defense of an approved thesis.
    Schedule {
        thesis: String,
        #[arg(long)]
        start: DateTime<Utc>,
        #[arg(long)]
        venue: String,
    },
    /// Record that the defense took place.
    Record {
        thesis: String,
        #[arg(long)]
        comment: Option<String>,
    },
}
