//! Core utilities for gitparator
//!
//! Error handling and the slash-normalized path helpers shared by the
//! ignore engine and the tree scanner.

pub mod error;
pub mod paths;

// Re-export commonly used items
pub use error::{GitparatorError, Result};
