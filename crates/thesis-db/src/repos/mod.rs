//! Storage operations, one module per table.
//!
//! Free functions take a `&libsql::Connection` so workflow operations can run
//! them inside their transaction (a `libsql::Transaction` derefs to one).
//! The public read surface is implemented here as `impl ThesisService`.

pub mod documents;
pub mod evaluations;
pub mod history;
pub mod jury;
pub mod people;
pub mod schedule;
pub mod snapshot;
pub mod thesis;
