//! CLI command implementations

pub mod check_ignore;
pub mod compare;
pub mod completion;
