//! Check-ignore command implementation

use crate::core::paths::to_slash;
use crate::ignore::{ExclusionFilter, ExclusionReason, FlatClassifier, IgnoreFile};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Serialize)]
struct CheckOutcome {
    path: String,
    excluded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<ExclusionReason>,
}

/// Execute the check-ignore command
pub fn execute(
    root: &Path,
    paths: Vec<String>,
    exclude: Vec<String>,
    ignore_file_name: String,
    non_matching: bool,
    json: bool,
) -> Result<()> {
    if !root.is_dir() {
        return Err(anyhow::anyhow!("Not a directory: {}", root.display()));
    }

    let outcomes = check_paths(root, &paths, ExclusionFilter::new(exclude, ignore_file_name));

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    for outcome in outcomes {
        match outcome.reason {
            Some(reason) => println!("{}\t{}", outcome.path.red(), reason),
            None if non_matching => println!("{}\t{}", outcome.path.green(), "not excluded".dimmed()),
            None => {},
        }
    }

    Ok(())
}

/// Classify root-relative paths the way a scan of `root` would
fn check_paths(root: &Path, paths: &[String], filter: ExclusionFilter) -> Vec<CheckOutcome> {
    let ignore_file_name = filter.ignore_file_name().to_string();
    let mut classifier = FlatClassifier::new(filter);
    let mut loaded: HashSet<String> = HashSet::new();

    paths
        .iter()
        .map(|raw| {
            let mut path = to_slash(raw);
            while let Some(stripped) = path.strip_prefix("./") {
                path = stripped.to_string();
            }
            if !path.ends_with('/') && root.join(&path).is_dir() {
                path.push('/');
            }

            let components: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
            for depth in 0..components.len() {
                let prefix = components[..depth].join("/");
                if !loaded.insert(prefix.clone()) {
                    continue;
                }
                match IgnoreFile::load_from_dir(&root.join(&prefix), &ignore_file_name) {
                    Ok(Some(file)) => classifier.add_ignore_file(&prefix, file.patterns),
                    Ok(None) => {},
                    Err(e) => warn!("Failed to read ignore file in {:?}: {}", prefix, e),
                }
            }

            let reason = classifier.classify(&path);
            CheckOutcome {
                path: path.trim_end_matches('/').to_string(),
                excluded: reason.is_some(),
                reason,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_check_paths_loads_ancestor_ignore_files() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "*.log\n")?;
        fs::create_dir_all(root.join("a/b"))?;
        fs::write(root.join("a/.gitignore"), "!keep.log\n")?;

        let paths = vec![
            "app.log".to_string(),
            "./a/b/keep.log".to_string(),
            "a/b/other.txt".to_string(),
            "a/b".to_string(),
        ];
        let outcomes = check_paths(root, &paths, ExclusionFilter::default());

        let flags: Vec<_> = outcomes.iter().map(|o| (o.path.as_str(), o.excluded)).collect();
        assert_eq!(
            flags,
            vec![("app.log", true), ("a/b/keep.log", false), ("a/b/other.txt", false), ("a/b", false)]
        );

        Ok(())
    }
}
