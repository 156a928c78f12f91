//! ID prefixes for generated identifiers (`{prefix}-{8 hex}`).

pub const PREFIX_THESIS: &str = "ths";
pub const PREFIX_AUTHOR: &str = "aut";
pub const PREFIX_ADVISOR: &str = "adv";
pub const PREFIX_JURY: &str = "jur";
pub const PREFIX_EVALUATION: &str = "evl";
pub const PREFIX_HISTORY: &str = "hst";
pub const PREFIX_DOCUMENT: &str = "doc";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_THESIS,
    PREFIX_AUTHOR,
    PREFIX_ADVISOR,
    PREFIX_JURY,
    PREFIX_EVALUATION,
    PREFIX_HISTORY,
    PREFIX_DOCUMENT,
];
