use chrono::{DateTime, Utc};
use thesis_core::enums::{ThesisStatus, TransitionKind};
use thesis_db::repos::thesis::ThesisFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CreateArgs;
use crate::commands::shared::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn create(args: &CreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = flags.principal()?;
    let thesis = ctx
        .service
        .create_thesis(
            &args.title,
            args.abstract_text.as_deref(),
            &args.keywords,
            &args.author,
            &actor,
        )
        .await?;
    output(&thesis, flags.format)
}

pub async fn get(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let thesis = ctx.service.get_thesis(id).await?;
    output(&thesis, flags.format)
}

pub async fn list(
    status: Option<ThesisStatus>,
    include_deleted: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = ThesisFilter {
        status,
        include_deleted,
        limit: Some(effective_limit(flags.limit, ctx.config.general.default_limit)),
    };
    let theses = ctx.service.list_theses(&filter).await?;
    output(&theses, flags.format)
}

pub async fn snapshot(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = ctx.service.thesis_snapshot(id).await?;
    output(&snapshot, flags.format)
}

pub async fn history(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entries = ctx.service.history(id).await?;
    output(&entries, flags.format)
}

pub async fn checklist(
    id: &str,
    kind: TransitionKind,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let checklist = ctx.service.checklist(id, kind).await?;
    output(&checklist, flags.format)
}

pub async fn overdue(
    as_of: Option<DateTime<Utc>>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let overdue = ctx.service.overdue_evaluations(as_of.unwrap_or_else(Utc::now)).await?;
    output(&overdue, flags.format)
}
