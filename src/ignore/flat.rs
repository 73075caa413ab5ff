//! Ignore classification for flattened listings
//!
//! Archive-like sources hand over every path at once instead of being
//! walked directory by directory. The level semantics of [`IgnoreStack`]
//! are rebuilt from the directory prefix of each ignore file: for every
//! ancestor of a path, root first, the ignore file registered for that
//! prefix becomes the next group, exactly as a walker entering that
//! directory would have pushed it.

use crate::core::paths::{parent_dir, to_slash};
use crate::ignore::filter::{ExclusionFilter, ExclusionReason};
use crate::ignore::parser::IgnoreFile;
use crate::ignore::scanner::ExcludedEntry;
use crate::ignore::stack::IgnoreStack;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct FlatClassifier {
    filter: ExclusionFilter,
    /// Pattern groups keyed by directory prefix, `""` being the root
    groups: BTreeMap<String, Vec<String>>,
}

impl FlatClassifier {
    pub fn new(filter: ExclusionFilter) -> Self {
        Self {
            filter,
            groups: BTreeMap::new(),
        }
    }

    /// Register the rules of the ignore file living in `dir_prefix`
    ///
    /// A file without rules adds no level, as in the tree scanner.
    pub fn add_ignore_file(&mut self, dir_prefix: &str, patterns: Vec<String>) {
        if patterns.is_empty() {
            return;
        }
        let prefix = normalize(dir_prefix);
        self.groups.insert(prefix, patterns);
    }

    /// Register an ignore file by its own path inside the listing
    pub fn add_ignore_content(&mut self, ignore_file_path: &str, content: &str) {
        let ignore_file_path = to_slash(ignore_file_path);
        let file = IgnoreFile::from_content(content, PathBuf::from(&ignore_file_path));
        self.add_ignore_file(parent_dir(&ignore_file_path), file.patterns);
    }

    /// Whether a path of the listing names an ignore file
    pub fn is_ignore_file(&self, path: &str) -> bool {
        let path = to_slash(path);
        !path.ends_with('/') && path.rsplit('/').next() == Some(self.filter.ignore_file_name())
    }

    /// Number of registered ignore files
    pub fn ignore_file_count(&self) -> usize {
        self.groups.len()
    }

    /// Decide whether a listing entry is excluded.
    ///
    /// A trailing `/` marks a directory. An entry below an excluded
    /// directory carries that directory's reason.
    pub fn classify(&self, path: &str) -> Option<ExclusionReason> {
        let path = to_slash(path);
        let is_dir = path.ends_with('/');
        let components: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();

        let mut stack = IgnoreStack::new("");
        let mut prefix = String::new();

        for (idx, component) in components.iter().enumerate() {
            if let Some(group) = self.groups.get(&prefix) {
                stack.push(group);
            }

            let rel_path = if prefix.is_empty() {
                component.to_string()
            } else {
                format!("{prefix}/{component}")
            };
            let entry_is_dir = idx + 1 < components.len() || is_dir;

            if let Some(reason) = self.filter.classify(&rel_path, entry_is_dir, &stack) {
                return Some(reason);
            }

            prefix = rel_path;
        }

        None
    }

    /// Split a listing into kept files and excluded entries.
    ///
    /// Directory entries are never reported as kept.
    pub fn partition<I, S>(&self, paths: I) -> (Vec<String>, Vec<ExcludedEntry>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept = Vec::new();
        let mut excluded = Vec::new();

        for path in paths {
            let path = to_slash(path.as_ref());
            let is_dir = path.ends_with('/');
            let trimmed = path.trim_matches('/').to_string();

            match self.classify(&path) {
                Some(reason) => excluded.push(ExcludedEntry {
                    path: trimmed,
                    is_dir,
                    reason,
                }),
                None if !is_dir => kept.push(trimmed),
                None => {},
            }
        }

        (kept, excluded)
    }
}

fn normalize(dir_prefix: &str) -> String {
    to_slash(dir_prefix)
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classifier() -> FlatClassifier {
        let mut flat = FlatClassifier::new(ExclusionFilter::default());
        flat.add_ignore_content(".gitignore", "*.log\nbuild/\n");
        flat.add_ignore_content("a/.gitignore", "!keep.log\n");
        flat
    }

    #[test]
    fn test_levels_follow_directory_prefixes() {
        let flat = classifier();

        assert!(flat.classify("app.log").is_some());
        assert_eq!(flat.classify("a/keep.log"), None);
        assert!(flat.classify("a/other.log").is_some());
        assert!(flat.classify("b/keep.log").is_some());
        assert_eq!(flat.classify("build/"), None);
        assert!(flat.classify("build/out.bin").is_some());
    }

    #[test]
    fn test_partition_listing() {
        let flat = classifier();
        let listing = [
            ".gitignore",
            "README.md",
            "a/",
            "a/.gitignore",
            "a/keep.log",
            "a/other.log",
            ".git/",
            ".git/HEAD",
        ];

        let (kept, excluded) = flat.partition(listing);

        assert_eq!(kept, vec!["README.md", "a/keep.log"]);
        let excluded: Vec<_> = excluded.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(excluded, vec![".gitignore", "a/.gitignore", "a/other.log", ".git", ".git/HEAD"]);
    }

    #[test]
    fn test_comment_only_ignore_file_adds_no_level() {
        let mut flat = FlatClassifier::new(ExclusionFilter::default());
        flat.add_ignore_content(".gitignore", "# nothing yet\n");
        flat.add_ignore_content("sub/.gitignore", "*.tmp\n");

        assert_eq!(flat.ignore_file_count(), 1);
        assert_eq!(
            flat.classify("sub/scratch.tmp"),
            Some(ExclusionReason::IgnoreRule {
                pattern: "*.tmp".into(),
                depth: 0
            })
        );
    }

    #[test]
    fn test_ignore_file_detection() {
        let flat = classifier();
        assert!(flat.is_ignore_file("x/y/.gitignore"));
        assert!(!flat.is_ignore_file(".gitignore/"));
        assert_eq!(flat.ignore_file_count(), 2);
    }
}
