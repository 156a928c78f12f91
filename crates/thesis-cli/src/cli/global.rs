use clap::ValueEnum;
use thesis_core::identity::Principal;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Single-line JSON.
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub quiet: bool,
    pub verbose: bool,
    pub db: Option<String>,
    pub actor: Option<String>,
    pub roles: Vec<String>,
}

impl GlobalFlags {
    /// The acting principal for commands that record an actor.
    pub fn principal(&self) -> anyhow::Result<Principal> {
        let Some(actor) = self.actor.as_deref().map(str::trim).filter(|a| !a.is_empty()) else {
            anyhow::bail!("this command records an actor: pass --actor <user-id>");
        };
        Ok(Principal::new(actor, self.roles.iter().map(String::as_str)))
    }
}
