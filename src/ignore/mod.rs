//! Path exclusion with layered ignore files
//!
//! `wildpath` is the glob matcher, `stack` holds one pattern group per
//! directory depth, `filter` combines the stack with the flat exclude list,
//! and `scanner` / `flat` drive them over a real tree or a flattened listing.

pub mod filter;
pub mod flat;
pub mod parser;
pub mod scanner;
pub mod stack;
pub mod wildpath;

// Re-export commonly used items
pub use filter::{ExclusionFilter, ExclusionReason};
pub use flat::FlatClassifier;
pub use parser::{IgnoreFile, DEFAULT_IGNORE_FILE};
pub use scanner::{ExcludedEntry, ScanResult, ScanStats, TreeScanner};
pub use stack::{IgnoreMatch, IgnoreStack, PatternRule, StackGuard};
pub use wildpath::matches;
