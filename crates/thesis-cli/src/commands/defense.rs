use thesis_core::schedule::DefenseSlot;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DefenseCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `thesis defense`.
pub async fn handle(action: &DefenseCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        DefenseCommands::Conflicts {
            start,
            venue,
            thesis,
            jurors,
        } => {
            let slot = DefenseSlot {
                thesis_id: thesis.clone(),
                start: *start,
                venue: venue.clone(),
                jurors: jurors.clone(),
            };
            let report = ctx.service.find_schedule_conflicts(&slot).await?;
            output(&report, flags.format)
        }
        DefenseCommands::Schedule {
            thesis,
            start,
            venue,
        } => {
            let scheduled = ctx
                .service
                .schedule_defense(thesis, *start, venue, &flags.principal()?)
                .await?;
            if scheduled.report.has_conflicts() && !flags.quiet {
                eprintln!(
                    "warning: defense scheduled with {} conflict(s); see report.conflicts",
                    scheduled.report.conflicts.len()
                );
            }
            output(&scheduled, flags.format)
        }
        DefenseCommands::Record { thesis, comment } => {
            let thesis = ctx
                .service
                .record_defense(thesis, comment.as_deref(), &flags.principal()?)
                .await?;
            output(&thesis, flags.format)
        }
    }
}
