//! Entity structs for the thesis aggregate.
//!
//! Each entity maps to a table in the libSQL schema owned by `thesis-db`.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! output and schema validation.

mod advisor;
mod author;
mod document;
mod evaluation;
mod history;
mod jury;
mod snapshot;
mod thesis;

pub use advisor::Advisor;
pub use author::Author;
pub use document::{DocumentDescriptor, NewDocument};
pub use evaluation::JuryEvaluation;
pub use history::StatusHistoryEntry;
pub use jury::JuryMember;
pub use snapshot::ThesisSnapshot;
pub use thesis::Thesis;
