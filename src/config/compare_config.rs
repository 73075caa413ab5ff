//! Comparison configuration
//!
//! Settings come from `.gitparator.yaml` (or the file given with
//! `--config`), and command-line flags override whatever the file says.

use crate::core::error::{GitparatorError, Result};
use crate::ignore::parser::DEFAULT_IGNORE_FILE;
use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = ".gitparator.yaml";

/// Default report location
pub const DEFAULT_OUTPUT_FILE: &str = "report.html";

/// Settings for one comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Range of gitparator versions this file was written for, e.g. `>=0.2.0 <1.0.0`
    pub version: Option<String>,
    /// URL of the target repository
    pub target_url: Option<String>,
    /// Local directory to compare against
    pub target_path: Option<PathBuf>,
    /// Branch to check out when cloning
    pub branch: Option<String>,
    /// Tag to check out when cloning
    pub tag: Option<String>,
    /// Parent directory for the temporary checkout
    pub temp_dir: Option<PathBuf>,
    /// Where the HTML report goes
    pub output_file: PathBuf,
    /// Flat exclude patterns, matched against root-relative paths
    pub exclude_paths: Vec<String>,
    /// Honor per-directory ignore files
    pub respect_gitignore: bool,
    /// Name of the per-directory ignore file
    pub ignore_file_name: String,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            version: None,
            target_url: None,
            target_path: None,
            branch: None,
            tag: None,
            temp_dir: None,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            exclude_paths: Vec::new(),
            respect_gitignore: true,
            ignore_file_name: DEFAULT_IGNORE_FILE.to_string(),
        }
    }
}

/// Values given on the command line; `None` leaves the file value alone
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub target_url: Option<String>,
    pub target_path: Option<PathBuf>,
    pub branch: Option<String>,
    pub tag: Option<String>,
    pub temp_dir: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub exclude_paths: Vec<String>,
    pub respect_gitignore: Option<bool>,
    pub ignore_file_name: Option<String>,
}

impl CompareConfig {
    /// Load configuration from a YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GitparatorError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| GitparatorError::ConfigurationError {
            reason: format!("Failed to parse config: {}", e),
        })
    }

    /// Load the explicit config file, or the default one from `dir` when present.
    ///
    /// Returns the configuration and the file it came from, if any.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load_from(path)?, Some(path.to_path_buf())));
        }

        let default_path = dir.join(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            let config = Self::load_from(&default_path)?;
            return Ok((config, Some(default_path)));
        }

        Ok((Self::default(), None))
    }

    /// Apply command-line values on top of the file values
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.target_url {
            self.target_url = Some(url);
        }
        if let Some(path) = overrides.target_path {
            self.target_path = Some(path);
        }
        if let Some(branch) = overrides.branch {
            self.branch = Some(branch);
        }
        if let Some(tag) = overrides.tag {
            self.tag = Some(tag);
        }
        if let Some(temp_dir) = overrides.temp_dir {
            self.temp_dir = Some(temp_dir);
        }
        if let Some(output_file) = overrides.output_file {
            self.output_file = output_file;
        }
        if !overrides.exclude_paths.is_empty() {
            self.exclude_paths = overrides.exclude_paths;
        }
        if let Some(respect) = overrides.respect_gitignore {
            self.respect_gitignore = respect;
        }
        if let Some(name) = overrides.ignore_file_name {
            self.ignore_file_name = name;
        }
    }

    /// Check that the configuration describes a runnable comparison
    pub fn validate(&self) -> Result<()> {
        if self.target_path.is_none() && self.target_url.is_none() {
            return Err(GitparatorError::configuration(
                "either target_path or target_url must be specified",
            ));
        }
        if self.branch.is_some() && self.tag.is_some() {
            return Err(GitparatorError::configuration(
                "branch and tag are mutually exclusive",
            ));
        }
        if self.ignore_file_name.is_empty() || self.ignore_file_name.contains(['/', '\\']) {
            return Err(GitparatorError::ConfigurationError {
                reason: format!("invalid ignore file name: {:?}", self.ignore_file_name),
            });
        }
        if let Some(constraint) = &self.version {
            check_version(constraint, crate::VERSION)?;
        }
        Ok(())
    }
}

/// Check that `app_version` satisfies a version constraint.
///
/// Alternatives are separated by `||`. Inside one alternative, comparators
/// may be separated by commas or by whitespace, so both `>=0.2, <1` and
/// `>=0.2.0 <1.0.0` are accepted.
pub fn check_version(constraint: &str, app_version: &str) -> Result<()> {
    let version = Version::parse(app_version)
        .map_err(|e| GitparatorError::internal(format!("invalid application version {app_version}: {e}")))?;

    let mut satisfied = false;
    for alternative in constraint.split("||") {
        let req = parse_requirement(alternative).map_err(|e| GitparatorError::ConfigurationError {
            reason: format!("invalid version constraint {constraint:?} in configuration file: {e}"),
        })?;
        satisfied |= req.matches(&version);
    }

    if !satisfied {
        return Err(GitparatorError::ConfigurationError {
            reason: format!("application version {version} does not satisfy constraint {constraint:?}"),
        });
    }
    Ok(())
}

fn parse_requirement(alternative: &str) -> std::result::Result<VersionReq, semver::Error> {
    let mut comparators: Vec<String> = Vec::new();
    let mut pending_op = String::new();

    for token in alternative.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        // a bare operator belongs to the version after it: `>= 1.0`
        if token.chars().all(|c| matches!(c, '<' | '>' | '=' | '~' | '^')) {
            pending_op.push_str(token);
            continue;
        }
        comparators.push(format!("{}{token}", std::mem::take(&mut pending_op)));
    }
    if !pending_op.is_empty() {
        comparators.push(pending_op);
    }

    VersionReq::parse(&comparators.join(", "))
}
