use chrono::NaiveDate;
use serde::Serialize;
use thesis_core::calendar::{add_business_days, business_days_between};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DeadlineCommands;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct DeadlineAnswer {
    start: NaiveDate,
    end: NaiveDate,
    business_days: u32,
}

fn answer(action: &DeadlineCommands) -> anyhow::Result<DeadlineAnswer> {
    match *action {
        DeadlineCommands::Add { start, days } => {
            let Some(end) = add_business_days(start, days) else {
                anyhow::bail!("{start} + {days} business days is past the last supported date");
            };
            Ok(DeadlineAnswer {
                start,
                end,
                business_days: days,
            })
        }
        DeadlineCommands::Between { start, end } => Ok(DeadlineAnswer {
            start,
            end,
            business_days: business_days_between(start, end),
        }),
    }
}

/// Handle `thesis deadline`.
pub fn handle(action: &DeadlineCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&answer(action)?, flags.format)
}
