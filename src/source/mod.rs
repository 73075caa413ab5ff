//! Where the target tree comes from
//!
//! Either a local directory, or a shallow clone of a remote repository into
//! a temporary directory that is removed once the comparison is done.

use crate::config::CompareConfig;
use crate::core::error::{GitparatorError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::{info, warn};

/// Target of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    /// An existing local directory
    Local(PathBuf),
    /// A repository to clone
    Remote {
        url: String,
        /// Branch or tag to check out
        reference: Option<String>,
        /// Parent directory for the checkout
        temp_dir: Option<PathBuf>,
    },
}

/// A target ready to be scanned. Dropping it removes any temporary checkout.
#[derive(Debug)]
pub struct PreparedTarget {
    path: PathBuf,
    _checkout: Option<TempDir>,
}

impl PreparedTarget {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TargetSource {
    /// Pick the target from a validated configuration.
    ///
    /// A local path wins over a URL.
    pub fn from_config(config: &CompareConfig) -> Result<Self> {
        if let Some(path) = &config.target_path {
            if config.branch.is_some() || config.tag.is_some() {
                warn!("--branch and --tag are ignored when a target path is given");
            }
            return Ok(TargetSource::Local(path.clone()));
        }

        match &config.target_url {
            Some(url) => Ok(TargetSource::Remote {
                url: url.clone(),
                reference: config.branch.clone().or_else(|| config.tag.clone()),
                temp_dir: config.temp_dir.clone(),
            }),
            None => Err(GitparatorError::configuration(
                "either target_path or target_url must be specified",
            )),
        }
    }

    /// Make the target available on disk
    pub fn prepare(&self) -> Result<PreparedTarget> {
        match self {
            TargetSource::Local(path) => {
                if !path.exists() {
                    return Err(GitparatorError::target_not_found(path.clone()));
                }
                Ok(PreparedTarget {
                    path: path.clone(),
                    _checkout: None,
                })
            },
            TargetSource::Remote {
                url,
                reference,
                temp_dir,
            } => {
                let mut builder = tempfile::Builder::new();
                builder.prefix("gitparator-");
                let checkout = match temp_dir {
                    Some(parent) => {
                        std::fs::create_dir_all(parent)?;
                        builder.tempdir_in(parent)?
                    },
                    None => builder.tempdir()?,
                };

                let dest = checkout.path().join("target");
                clone_repo(url, reference.as_deref(), &dest)?;

                Ok(PreparedTarget {
                    path: dest,
                    _checkout: Some(checkout),
                })
            },
        }
    }
}

/// Arguments for a shallow single-branch clone
fn clone_args(url: &str, reference: Option<&str>, dest: &Path) -> Vec<String> {
    let mut args = vec![
        "clone".to_string(),
        "--depth".to_string(),
        "1".to_string(),
        "--single-branch".to_string(),
        "--quiet".to_string(),
    ];
    if let Some(reference) = reference {
        args.push("--branch".to_string());
        args.push(reference.to_string());
    }
    args.push("--".to_string());
    args.push(url.to_string());
    args.push(dest.to_string_lossy().into_owned());
    args
}

fn clone_repo(url: &str, reference: Option<&str>, dest: &Path) -> Result<()> {
    info!(url, reference, "cloning target repository");

    let output = Command::new("git")
        .args(clone_args(url, reference, dest))
        .output()
        .map_err(|e| GitparatorError::clone_failed(url, format!("cannot run git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitparatorError::clone_failed(url, stderr.trim()));
    }

    Ok(())
}
