use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Create(args) => commands::thesis::create(&args, ctx, flags).await,
        Commands::Get { id } => commands::thesis::get(&id, ctx, flags).await,
        Commands::List {
            status,
            include_deleted,
        } => commands::thesis::list(status, include_deleted, ctx, flags).await,
        Commands::Snapshot { id } => commands::thesis::snapshot(&id, ctx, flags).await,
        Commands::History { id } => commands::thesis::history(&id, ctx, flags).await,
        Commands::Checklist { id, kind } => commands::thesis::checklist(&id, kind, ctx, flags).await,
        Commands::Overdue { as_of } => commands::thesis::overdue(as_of, ctx, flags).await,
        Commands::Author { action } => commands::people::handle_author(&action, ctx, flags).await,
        Commands::Advisor { action } => commands::people::handle_advisor(&action, ctx, flags).await,
        Commands::Document { action } => commands::document::handle(&action, ctx, flags).await,
        Commands::Review { action } => commands::review::handle(&action, ctx, flags).await,
        Commands::Jury { action } => commands::jury::handle(&action, ctx, flags).await,
        Commands::Evaluation { action } => commands::evaluation::handle(&action, ctx, flags).await,
        Commands::Verdict(args) => commands::verdict::issue(&args, ctx, flags).await,
        Commands::Resubmit(args) => commands::verdict::resubmit(&args, ctx, flags).await,
        Commands::FinalReport { action } => commands::final_report::handle(&action, ctx, flags).await,
        Commands::Defense { action } => commands::defense::handle(&action, ctx, flags).await,
        Commands::Admin { action } => commands::admin::handle(&action, ctx, flags).await,
        Commands::Deadline { action } => commands::deadline::handle(&action, flags),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
