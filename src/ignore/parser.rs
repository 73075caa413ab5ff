//! Ignore-file parsing
//!
//! An ignore file contributes its non-blank, non-comment lines, trimmed and
//! in file order, as one pattern group.

use crate::core::error::{GitparatorError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default name of the per-directory ignore file
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Patterns read from one ignore file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreFile {
    /// Where the patterns came from
    pub source: PathBuf,
    /// Raw rules, in file order
    pub patterns: Vec<String>,
}

impl IgnoreFile {
    /// Read an ignore file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_content(&content, path.to_path_buf()))
    }

    /// Read `dir/<file_name>` if it exists
    pub fn load_from_dir(dir: &Path, file_name: &str) -> Result<Option<Self>> {
        match Self::from_file(&dir.join(file_name)) {
            Ok(file) => Ok(Some(file)),
            Err(GitparatorError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Parse ignore-file content
    pub fn from_content(content: &str, source: PathBuf) -> Self {
        let patterns = content.lines().filter_map(parse_line).collect();
        Self { source, patterns }
    }

    /// Whether the file holds no rules (only blanks and comments)
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Parse a single line, skipping blanks and `#` comments
pub fn parse_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line.to_string())
}
