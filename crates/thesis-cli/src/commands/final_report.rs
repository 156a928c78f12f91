use crate::cli::GlobalFlags;
use crate::cli::subcommands::FinalReportCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `thesis final-report`.
pub async fn handle(
    action: &FinalReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = flags.principal()?;
    let thesis = match action {
        FinalReportCommands::Start { thesis } => ctx.service.start_final_report(thesis, &actor).await?,
        FinalReportCommands::Submit { thesis } => {
            ctx.service.submit_final_report(thesis, &actor).await?
        }
    };
    output(&thesis, flags.format)
}
