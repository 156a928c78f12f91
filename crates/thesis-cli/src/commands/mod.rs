pub mod admin;
pub mod deadline;
pub mod defense;
pub mod dispatch;
pub mod document;
pub mod evaluation;
pub mod final_report;
pub mod jury;
pub mod people;
pub mod review;
pub mod schema;
pub mod shared;
pub mod thesis;
pub mod verdict;
