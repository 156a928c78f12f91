use thesis_core::entities::NewDocument;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DocumentCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `thesis document`.
pub async fn handle(action: &DocumentCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        DocumentCommands::Attach {
            thesis,
            doc_type,
            file,
            owner,
            signature,
        } => {
            let mut doc = NewDocument::new(*doc_type, file).signed(*signature);
            if let Some(owner) = owner {
                doc = doc.owned_by(owner);
            }
            let descriptor = ctx.service.attach_document(thesis, &doc).await?;
            output(&descriptor, flags.format)
        }
        DocumentCommands::Sign { document, status } => {
            let descriptor = ctx.service.mark_document_signed(document, *status).await?;
            output(&descriptor, flags.format)
        }
        DocumentCommands::List { thesis, all } => {
            let documents = ctx.service.list_documents(thesis, !all).await?;
            output(&documents, flags.format)
        }
        DocumentCommands::Handoff { thesis } => {
            let thesis = ctx.service.confirm_voucher_handoff(thesis).await?;
            output(&thesis, flags.format)
        }
    }
}
