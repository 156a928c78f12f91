use serde::Serialize;
use thesis_core::enums::Phase;
use thesis_db::workflow::evaluation::EvaluationSubmission;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EvaluationCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RoundStatus<'a> {
    thesis_id: &'a str,
    phase: Phase,
    round: u32,
    complete: bool,
}

#[derive(Debug, Serialize)]
struct SeatStatus<'a> {
    jury_member_id: &'a str,
    round: u32,
    evaluated: bool,
}

/// Handle `thesis evaluation`.
pub async fn handle(action: &EvaluationCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        EvaluationCommands::Submit {
            thesis,
            seat,
            result,
            observation,
            attachment,
        } => {
            let submission = EvaluationSubmission {
                result: *result,
                observation: observation.clone(),
                attachment: attachment.clone(),
            };
            let receipt = ctx
                .service
                .submit_evaluation(thesis, seat, &submission, &flags.principal()?)
                .await?;
            output(&receipt, flags.format)
        }
        EvaluationCommands::List {
            thesis,
            phase,
            round,
        } => {
            let (phase, round) = resolve_round(ctx, thesis, *phase, *round).await?;
            let evaluations = ctx.service.evaluations_for(thesis, phase, round).await?;
            output(&evaluations, flags.format)
        }
        EvaluationCommands::Complete {
            thesis,
            phase,
            round,
        } => {
            let (phase, round) = resolve_round(ctx, thesis, *phase, *round).await?;
            let complete = ctx.service.is_round_complete(thesis, phase, round).await?;
            let status = RoundStatus {
                thesis_id: thesis,
                phase,
                round,
                complete,
            };
            output(&status, flags.format)
        }
        EvaluationCommands::Done { seat, round } => {
            let evaluated = ctx.service.has_evaluated(seat, *round).await?;
            let status = SeatStatus {
                jury_member_id: seat,
                round: *round,
                evaluated,
            };
            output(&status, flags.format)
        }
    }
}

/// Fill an unspecified phase or round from the thesis's current position.
async fn resolve_round(
    ctx: &AppContext,
    thesis_id: &str,
    phase: Option<Phase>,
    round: Option<u32>,
) -> anyhow::Result<(Phase, u32)> {
    if let (Some(phase), Some(round)) = (phase, round) {
        return Ok((phase, round));
    }
    let thesis = ctx.service.get_thesis(thesis_id).await?;
    Ok((
        phase.unwrap_or(thesis.current_phase),
        round.unwrap_or(thesis.current_round),
    ))
}
