//! Tree comparison
//!
//! Pairs the files of two scanned trees by their root-relative path and
//! buckets them by byte equality.

use crate::core::error::Result;
use crate::ignore::scanner::{ExcludedEntry, ScanResult};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of comparing a source tree with a target tree
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonResult {
    pub identical_files: Vec<String>,
    pub different_files: Vec<String>,
    pub source_only_files: Vec<String>,
    pub target_only_files: Vec<String>,
    pub excluded_source: Vec<ExcludedEntry>,
    pub excluded_target: Vec<ExcludedEntry>,
}

/// Counts per bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub identical: usize,
    pub different: usize,
    pub source_only: usize,
    pub target_only: usize,
    pub excluded: usize,
}

impl ComparisonResult {
    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            identical: self.identical_files.len(),
            different: self.different_files.len(),
            source_only: self.source_only_files.len(),
            target_only: self.target_only_files.len(),
            excluded: self.excluded_source.len() + self.excluded_target.len(),
        }
    }

    /// Both trees hold the same files with the same content
    pub fn trees_match(&self) -> bool {
        self.different_files.is_empty()
            && self.source_only_files.is_empty()
            && self.target_only_files.is_empty()
    }
}

/// Compare two scanned trees
pub fn compare_trees(source: &ScanResult, target: &ScanResult) -> ComparisonResult {
    let mut result = ComparisonResult {
        excluded_source: source.excluded.clone(),
        excluded_target: target.excluded.clone(),
        ..ComparisonResult::default()
    };

    // BTreeMap keys keep every bucket sorted
    for (rel_path, source_file) in &source.files {
        match target.files.get(rel_path) {
            Some(target_file) => {
                if files_are_equal(source_file, target_file) {
                    result.identical_files.push(rel_path.clone());
                } else {
                    result.different_files.push(rel_path.clone());
                }
            },
            None => result.source_only_files.push(rel_path.clone()),
        }
    }

    result.target_only_files = target
        .files
        .keys()
        .filter(|rel_path| !source.files.contains_key(*rel_path))
        .cloned()
        .collect();

    debug!(summary = ?result.summary(), "comparison complete");
    result
}

/// Byte-compare two files. Unreadable files count as different.
pub fn files_are_equal(a: &Path, b: &Path) -> bool {
    match contents_equal(a, b) {
        Ok(equal) => equal,
        Err(e) => {
            warn!("Cannot compare {} with {}: {}", a.display(), b.display(), e);
            false
        },
    }
}

fn contents_equal(a: &Path, b: &Path) -> Result<bool> {
    let meta_a = std::fs::metadata(a)?;
    let meta_b = std::fs::metadata(b)?;
    if meta_a.len() != meta_b.len() {
        return Ok(false);
    }

    let mut reader_a = BufReader::new(File::open(a)?);
    let mut reader_b = BufReader::new(File::open(b)?);
    let mut buf_a = [0u8; 8192];
    let mut buf_b = [0u8; 8192];

    loop {
        let read = reader_a.read(&mut buf_a)?;
        if read == 0 {
            // lengths matched, so b must be exhausted too
            let mut probe = [0u8; 1];
            return Ok(reader_b.read(&mut probe)? == 0);
        }
        reader_b.read_exact(&mut buf_b[..read])?;
        if buf_a[..read] != buf_b[..read] {
            return Ok(false);
        }
    }
}
