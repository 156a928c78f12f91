use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReviewCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `thesis review`.
pub async fn handle(action: &ReviewCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = flags.principal()?;
    let thesis = match action {
        ReviewCommands::Submit { thesis } => ctx.service.submit_for_review(thesis, &actor).await?,
        ReviewCommands::Approve { thesis, comment } => {
            ctx.service
                .review_decision(thesis, true, comment.as_deref(), &actor)
                .await?
        }
        ReviewCommands::Observe { thesis, comment } => {
            ctx.service
                .review_decision(thesis, false, Some(comment), &actor)
                .await?
        }
        ReviewCommands::Resubmit { thesis } => {
            ctx.service.resubmit_for_review(thesis, &actor).await?
        }
    };
    output(&thesis, flags.format)
}
