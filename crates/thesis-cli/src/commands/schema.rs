use schemars::{Schema, schema_for};
use thesis_core::checklist::Checklist;
use thesis_core::entities::{
    Advisor, Author, DocumentDescriptor, JuryEvaluation, JuryMember, NewDocument, StatusHistoryEntry,
    Thesis, ThesisSnapshot,
};
use thesis_core::identity::Principal;
use thesis_core::notify::Notification;
use thesis_core::responses::{DefenseScheduled, EvaluationReceipt, OverdueEvaluation, VerdictOutcome};
use thesis_core::schedule::{ConflictReport, DefenseSlot};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

const TYPE_NAMES: &[&str] = &[
    "thesis",
    "snapshot",
    "author",
    "advisor",
    "jury-member",
    "evaluation",
    "document",
    "new-document",
    "history",
    "checklist",
    "principal",
    "notification",
    "defense-slot",
    "conflict-report",
    "evaluation-receipt",
    "verdict-outcome",
    "defense-scheduled",
    "overdue-evaluation",
];

fn schema_named(name: &str) -> Option<Schema> {
    let schema = match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "thesis" => schema_for!(Thesis),
        "snapshot" => schema_for!(ThesisSnapshot),
        "author" => schema_for!(Author),
        "advisor" => schema_for!(Advisor),
        "jury-member" => schema_for!(JuryMember),
        "evaluation" => schema_for!(JuryEvaluation),
        "document" => schema_for!(DocumentDescriptor),
        "new-document" => schema_for!(NewDocument),
        "history" => schema_for!(StatusHistoryEntry),
        "checklist" => schema_for!(Checklist),
        "principal" => schema_for!(Principal),
        "notification" => schema_for!(Notification),
        "defense-slot" => schema_for!(DefenseSlot),
        "conflict-report" => schema_for!(ConflictReport),
        "evaluation-receipt" => schema_for!(EvaluationReceipt),
        "verdict-outcome" => schema_for!(VerdictOutcome),
        "defense-scheduled" => schema_for!(DefenseScheduled),
        "overdue-evaluation" => schema_for!(OverdueEvaluation),
        _ => return None,
    };
    Some(schema)
}

/// Handle `thesis schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(schema) = schema_named(&args.type_name) else {
        anyhow::bail!(
            "unknown type '{}' (expected one of: {})",
            args.type_name,
            TYPE_NAMES.join(", ")
        );
    };
    output(&schema, flags.format)
}
