use chrono::NaiveDate;
use clap::Subcommand;
use thesis_core::calendar::MAX_WINDOW_DAYS;

/// Business-day calculator. Needs no database.
#[derive(Clone, Debug, Subcommand)]
pub enum DeadlineCommands {
    /// Date `days` business days after `start`.
    Add {
        start: NaiveDate,
        #[arg(value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_WINDOW_DAYS)))]
        days: u32,
    },
    /// Business days after `start` up to and including `end`.
    Between { start: NaiveDate, end: NaiveDate },
}
