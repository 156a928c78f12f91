use crate::cli::GlobalFlags;
use crate::cli::root_commands::CommentArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `thesis verdict`.
pub async fn issue(args: &CommentArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let outcome = ctx
        .service
        .issue_verdict(&args.thesis, args.comment.as_deref(), &flags.principal()?)
        .await?;
    output(&outcome, flags.format)
}

/// Handle `thesis resubmit`.
pub async fn resubmit(args: &CommentArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let thesis = ctx
        .service
        .resubmit_after_observation(&args.thesis, args.comment.as_deref(), &flags.principal()?)
        .await?;
    output(&thesis, flags.format)
}
