pub mod admin;
pub mod deadline;
pub mod defense;
pub mod document;
pub mod evaluation;
pub mod final_report;
pub mod jury;
pub mod people;
pub mod review;

pub use admin::AdminCommands;
pub use deadline::DeadlineCommands;
pub use defense::DefenseCommands;
pub use document::DocumentCommands;
pub use evaluation::EvaluationCommands;
pub use final_report::FinalReportCommands;
pub use jury::JuryCommands;
pub use people::{AdvisorCommands, AuthorCommands};
pub use review::ReviewCommands;
