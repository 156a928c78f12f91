use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AdvisorCommands, AuthorCommands};
use crate::context::AppContext;
use crate::output::output;

/// Handle `thesis author`.
pub async fn handle_author(
    action: &AuthorCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let author = match action {
        AuthorCommands::Add { thesis, user } => ctx.service.add_co_author(thesis, user).await?,
        AuthorCommands::Accept { thesis, user } => {
            ctx.service.respond_co_author(thesis, user, true).await?
        }
        AuthorCommands::Decline { thesis, user } => {
            ctx.service.respond_co_author(thesis, user, false).await?
        }
    };
    output(&author, flags.format)
}

/// Handle `thesis advisor`.
pub async fn handle_advisor(
    action: &AdvisorCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let advisor = match action {
        AdvisorCommands::Add {
            thesis,
            user,
            advisor_type,
        } => ctx.service.add_advisor(thesis, user, *advisor_type).await?,
        AdvisorCommands::Accept { thesis, user } => {
            ctx.service.respond_advisor(thesis, user, true).await?
        }
        AdvisorCommands::Decline { thesis, user } => {
            ctx.service.respond_advisor(thesis, user, false).await?
        }
    };
    output(&advisor, flags.format)
}
