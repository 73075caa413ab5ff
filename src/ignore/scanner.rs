//! Depth-first tree scanner with layered ignore files

use crate::core::error::{GitparatorError, Result};
use crate::core::paths::{join, path_to_slash};
use crate::ignore::filter::{ExclusionFilter, ExclusionReason};
use crate::ignore::parser::IgnoreFile;
use crate::ignore::stack::IgnoreStack;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// An entry left out of the scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedEntry {
    /// Root-relative, slash-separated path
    pub path: String,
    pub is_dir: bool,
    pub reason: ExclusionReason,
}

/// Statistics from a scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    /// Directories descended into, the root included
    pub directories_visited: usize,
    /// Ignore files pushed onto the stack
    pub ignore_files_loaded: usize,
    /// Files kept
    pub files_found: usize,
    /// Entries excluded (an excluded directory counts once)
    pub entries_excluded: usize,
    /// Total scanning time
    #[serde(skip)]
    pub total_time: Duration,
}

/// Result of scanning one tree
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Root the scan started from
    pub root: PathBuf,
    /// Kept files keyed by root-relative path
    pub files: BTreeMap<String, PathBuf>,
    /// Excluded entries in traversal order
    pub excluded: Vec<ExcludedEntry>,
    pub stats: ScanStats,
}

/// Walks one tree, pushing each directory's ignore file on entry and
/// popping it on exit
#[derive(Debug, Clone)]
pub struct TreeScanner {
    root: PathBuf,
    filter: ExclusionFilter,
    respect_ignore_files: bool,
}

impl TreeScanner {
    /// Create a scanner for the tree at `root`
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            filter: ExclusionFilter::default(),
            respect_ignore_files: true,
        }
    }

    /// Use a specific exclude list and ignore-file name
    pub fn with_filter(mut self, filter: ExclusionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set whether per-directory ignore files are honored
    pub fn respect_ignore_files(mut self, respect: bool) -> Self {
        self.respect_ignore_files = respect;
        self
    }

    /// Scan the tree
    pub fn scan(&self) -> Result<ScanResult> {
        if !self.root.exists() {
            return Err(GitparatorError::target_not_found(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(GitparatorError::NotADirectory {
                path: self.root.clone(),
            });
        }

        let start_time = Instant::now();
        let mut result = ScanResult {
            root: self.root.clone(),
            files: BTreeMap::new(),
            excluded: Vec::new(),
            stats: ScanStats::default(),
        };

        // one stack per tree, never shared
        let mut stack = IgnoreStack::new(&path_to_slash(&self.root));
        self.walk_dir(&self.root, "", &mut stack, &mut result);

        result.stats.files_found = result.files.len();
        result.stats.entries_excluded = result.excluded.len();
        result.stats.total_time = start_time.elapsed();

        debug!(
            root = %self.root.display(),
            files = result.stats.files_found,
            excluded = result.stats.entries_excluded,
            "scan complete"
        );

        Ok(result)
    }

    fn walk_dir(&self, dir: &Path, rel_dir: &str, stack: &mut IgnoreStack, result: &mut ScanResult) {
        let patterns = if self.respect_ignore_files {
            self.load_patterns(dir)
        } else {
            None
        };

        let mut scope = stack.scope(patterns);
        result.stats.directories_visited += 1;
        if scope.pushed() {
            result.stats.ignore_files_loaded += 1;
            trace!(dir = rel_dir, depth = scope.depth(), "pushed ignore rules");
        }

        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error accessing entry under {}: {}", dir.display(), e);
                    continue;
                },
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let rel_path = join(rel_dir, &name);
            let is_dir = entry.file_type().is_dir();

            if let Some(reason) = self.filter.classify(&rel_path, is_dir, &scope) {
                trace!(path = %rel_path, %reason, "excluded");
                result.excluded.push(ExcludedEntry {
                    path: rel_path,
                    is_dir,
                    reason,
                });
                continue;
            }

            if is_dir {
                self.walk_dir(entry.path(), &rel_path, &mut scope, result);
            } else {
                result.files.insert(rel_path, entry.into_path());
            }
        }
    }

    fn load_patterns(&self, dir: &Path) -> Option<Vec<String>> {
        match IgnoreFile::load_from_dir(dir, self.filter.ignore_file_name()) {
            // an ignore file without rules adds no level
            Ok(file) => file.filter(|file| !file.is_empty()).map(|file| file.patterns),
            Err(e) => {
                warn!(
                    "Failed to read {} in {}: {}",
                    self.filter.ignore_file_name(),
                    dir.display(),
                    e
                );
                None
            },
        }
    }
}
