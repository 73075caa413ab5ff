//! Gitparator - compare two directory trees with layered ignore rules
//!
//! Gitparator walks a source tree and a target tree (a local directory or a
//! shallow clone of a remote repository), excludes entries using per-directory
//! ignore files and an explicit exclude list, and reports which files are
//! identical, different, or present on one side only.
//!
//! # Core Features
//!
//! - **Wildcard Paths**: `*`, `?`, `[...]`, `**` and `{a,b}` matching on slash separated paths
//! - **Layered Ignore Rules**: one level per directory, deepest level decides, `!` re-includes
//! - **Tree Comparison**: byte-for-byte comparison of the files both trees keep
//! - **Reports**: HTML report file or JSON on stdout
//!
//! # Example Usage
//!
//! ```rust
//! use gitparator::IgnoreStack;
//!
//! let mut stack = IgnoreStack::new("/repo");
//! stack.push(["*.log", "build/"]);
//! {
//!     let guard = stack.scope(Some(["!keep.log"]));
//!     assert!(!guard.should_ignore("/repo/src/keep.log"));
//! }
//! assert!(stack.should_ignore("/repo/src/keep.log"));
//! assert!(stack.should_ignore("/repo/build/out.o"));
//! ```

pub mod cli;
pub mod compare;
pub mod config;
pub mod core;
pub mod ignore;
pub mod report;
pub mod source;

// Re-export commonly used types
pub use core::error::{GitparatorError, Result};

pub use ignore::{matches, ExclusionFilter, ExclusionReason, IgnoreStack, TreeScanner};

pub use config::CompareConfig;

pub use compare::{compare_trees, ComparisonResult};

/// Current version of Gitparator
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
