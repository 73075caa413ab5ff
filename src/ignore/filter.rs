//! Exclusion decisions used by the tree walkers
//!
//! An entry is excluded when it is a `.git` directory or the ignore file
//! itself, when it matches the flat exclude list, or when the ignore stack
//! says so.

use crate::core::paths::join;
use crate::ignore::parser::DEFAULT_IGNORE_FILE;
use crate::ignore::stack::IgnoreStack;
use crate::ignore::wildpath;
use serde::Serialize;
use std::fmt;

const GIT_DIR: &str = ".git";

/// Why an entry was left out of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// A `.git` directory
    GitDirectory,
    /// The ignore file itself
    IgnoreFile,
    /// Matched a pattern of the flat exclude list
    ExcludeList { pattern: String },
    /// Ignored by a rule of the ignore stack
    IgnoreRule { pattern: String, depth: usize },
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::GitDirectory => write!(f, ".git directory"),
            ExclusionReason::IgnoreFile => write!(f, "ignore file"),
            ExclusionReason::ExcludeList { pattern } => write!(f, "exclude pattern {pattern}"),
            ExclusionReason::IgnoreRule { pattern, depth } => {
                write!(f, "ignore rule {pattern} (level {depth})")
            },
        }
    }
}

/// Flat exclude list plus the unconditional exclusions
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    exclude_patterns: Vec<String>,
    ignore_file_name: String,
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_IGNORE_FILE)
    }
}

impl ExclusionFilter {
    pub fn new(exclude_patterns: Vec<String>, ignore_file_name: impl Into<String>) -> Self {
        Self {
            exclude_patterns,
            ignore_file_name: ignore_file_name.into(),
        }
    }

    pub fn ignore_file_name(&self) -> &str {
        &self.ignore_file_name
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude_patterns
    }

    /// First pattern of the flat exclude list matching `rel_path`
    pub fn excluded_by_list(&self, rel_path: &str) -> Option<&str> {
        self.exclude_patterns
            .iter()
            .find(|pattern| wildpath::matches(pattern, rel_path))
            .map(String::as_str)
    }

    /// Decide whether an entry of the tree rooted at `stack.base_path()` is excluded.
    ///
    /// `rel_path` is relative to that root and slash-separated.
    pub fn classify(&self, rel_path: &str, is_dir: bool, stack: &IgnoreStack) -> Option<ExclusionReason> {
        let name = rel_path.rsplit('/').next().unwrap_or(rel_path);

        if is_dir && name == GIT_DIR {
            return Some(ExclusionReason::GitDirectory);
        }
        if !is_dir && name == self.ignore_file_name {
            return Some(ExclusionReason::IgnoreFile);
        }

        if let Some(pattern) = self.excluded_by_list(rel_path) {
            return Some(ExclusionReason::ExcludeList {
                pattern: pattern.to_string(),
            });
        }

        match stack.explain(&join(stack.base_path(), rel_path)) {
            Some(decision) if decision.ignored => Some(ExclusionReason::IgnoreRule {
                pattern: decision.pattern,
                depth: decision.depth,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconditional_exclusions() {
        let filter = ExclusionFilter::default();
        let stack = IgnoreStack::new("/repo");

        assert_eq!(filter.classify(".git", true, &stack), Some(ExclusionReason::GitDirectory));
        assert_eq!(filter.classify("sub/.git", true, &stack), Some(ExclusionReason::GitDirectory));
        assert_eq!(filter.classify("sub/.gitignore", false, &stack), Some(ExclusionReason::IgnoreFile));
        assert_eq!(filter.classify(".github", true, &stack), None);
        assert_eq!(filter.classify("src/main.rs", false, &stack), None);
    }

    #[test]
    fn test_exclude_list_has_no_negation() {
        let filter = ExclusionFilter::new(vec!["**/*.log".into(), "!keep.log".into()], ".gitignore");
        let stack = IgnoreStack::new("/repo");

        assert_eq!(
            filter.classify("logs/keep.log", false, &stack),
            Some(ExclusionReason::ExcludeList {
                pattern: "**/*.log".into()
            })
        );
        assert_eq!(filter.classify("notes.txt", false, &stack), None);
    }

    #[test]
    fn test_stack_decision() {
        let filter = ExclusionFilter::default();
        let mut stack = IgnoreStack::new("/repo");
        stack.push(["target/", "*.bak", "!keep.bak"]);

        assert_eq!(
            filter.classify("target/debug/app", false, &stack),
            Some(ExclusionReason::IgnoreRule {
                pattern: "target/".into(),
                depth: 0
            })
        );
        assert_eq!(filter.classify("target", true, &stack), None);
        assert_eq!(filter.classify("keep.bak", false, &stack), None);
    }

    #[test]
    fn test_custom_ignore_file_name() {
        let filter = ExclusionFilter::new(Vec::new(), ".cmpignore");
        let stack = IgnoreStack::new("");

        assert_eq!(filter.classify(".cmpignore", false, &stack), Some(ExclusionReason::IgnoreFile));
        assert_eq!(filter.classify(".gitignore", false, &stack), None);
    }
}
