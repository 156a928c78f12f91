use crate::cli::GlobalFlags;
use crate::cli::subcommands::AdminCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `thesis admin`.
pub async fn handle(action: &AdminCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = flags.principal()?;
    let thesis = match action {
        AdminCommands::Status {
            thesis,
            status,
            comment,
        } => ctx.service.change_status(thesis, *status, comment, &actor).await?,
        AdminCommands::Delete { thesis, comment } => {
            ctx.service.delete_thesis(thesis, comment.as_deref(), &actor).await?
        }
        AdminCommands::Restore { thesis, comment } => {
            ctx.service.restore(thesis, comment.as_deref(), &actor).await?
        }
    };
    output(&thesis, flags.format)
}
