use crate::cli::GlobalFlags;
use crate::cli::subcommands::JuryCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `thesis jury`.
pub async fn handle(action: &JuryCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        JuryCommands::Assign { thesis, user, role } => {
            let seat = ctx
                .service
                .assign_jury_member(thesis, user, *role, &flags.principal()?)
                .await?;
            output(&seat, flags.format)
        }
        JuryCommands::Remove { thesis, seat } => {
            let seat = ctx
                .service
                .remove_jury_member(thesis, seat, &flags.principal()?)
                .await?;
            output(&seat, flags.format)
        }
        JuryCommands::Start { thesis } => {
            let thesis = ctx
                .service
                .start_jury_evaluation(thesis, &flags.principal()?)
                .await?;
            output(&thesis, flags.format)
        }
        JuryCommands::Seats { thesis, phase } => {
            let phase = match phase {
                Some(phase) => *phase,
                None => ctx.service.get_thesis(thesis).await?.current_phase,
            };
            let seats = ctx.service.seats_for(thesis, phase).await?;
            output(&seats, flags.format)
        }
    }
}
