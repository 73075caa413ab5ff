//! Configuration management for gitparator
//!
//! A YAML file in the working directory supplies defaults for a comparison;
//! command-line flags take precedence over it.

pub mod compare_config;

// Re-export commonly used items
pub use compare_config::{CompareConfig, ConfigOverrides, DEFAULT_CONFIG_FILE, DEFAULT_OUTPUT_FILE};
