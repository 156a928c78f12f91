use clap::Subcommand;

/// Final report phase.
#[derive(Clone, Debug, Subcommand)]
pub enum FinalReportCommands {
    /// Open the final report phase of an approved project.
    Start { thesis: String },
    /// Submit the final report for jury evaluation.
    Submit { thesis: String },
}
