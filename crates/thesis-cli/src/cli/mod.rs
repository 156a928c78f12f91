use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `thesis` binary.
#[derive(Debug, Parser)]
#[command(name = "thesis", version, about = "Thesis workflow engine - drafts, juries, verdicts and defenses")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (overrides database.path from config)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// User ID recorded as the actor of a write
    #[arg(short, long, global = true)]
    pub actor: Option<String>,

    /// Roles of the actor, comma separated
    #[arg(long, global = true, value_delimiter = ',')]
    pub roles: Vec<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
            actor: self.actor.clone(),
            roles: self.roles.clone(),
        }
    }
}
