//! # thesis-core
//!
//! Core types and pure workflow rules for the thesis workflow engine.
//!
//! This crate holds everything that does not touch storage:
//! - Entity structs for the thesis aggregate (authors, advisors, jury seats,
//!   evaluations, documents, status history)
//! - Status enums and the phase-carrying [`stage::Stage`] view of a status
//! - The business-day calculator used for deadlines
//! - The requirement checklist evaluator that gates transitions
//! - Jury roster rules and round-completion detection
//! - The advisory schedule-conflict detector for defenses
//! - The notification contract consumed by the service layer

pub mod calendar;
pub mod checklist;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod notify;
pub mod responses;
pub mod roster;
pub mod schedule;
pub mod stage;
