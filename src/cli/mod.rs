//! Command-line interface for gitparator

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Gitparator - compare two directory trees
#[derive(Parser)]
#[command(
    name = "gitparator",
    version,
    about = "Compare two directory trees with layered ignore rules",
    long_about = "Gitparator compares a source tree with a local or cloned target tree, honoring per-directory ignore files and an explicit exclude list, and writes an HTML report."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output: auto, always, never
    #[arg(long, default_value = "auto", global = true)]
    pub color: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare the source tree with a target tree
    Compare(CompareArgs),

    /// Show whether paths of a tree are excluded, and why
    CheckIgnore {
        /// Root of the tree the paths belong to
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Paths to check, relative to the root
        #[arg(required = true)]
        paths: Vec<String>,

        /// Extra exclude patterns
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Name of the per-directory ignore file
        #[arg(long, default_value = ".gitignore")]
        ignore_file_name: String,

        /// Print paths that are not excluded too
        #[arg(short = 'n', long)]
        non_matching: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments of the compare command
#[derive(clap::Args, Debug, Default)]
pub struct CompareArgs {
    /// Config file (default: .gitparator.yaml in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source tree
    #[arg(long, default_value = ".")]
    pub source: PathBuf,

    /// URL of the target repository
    #[arg(short = 'u', long, env = "TARGET_URL")]
    pub target_url: Option<String>,

    /// Path to the target tree
    #[arg(short = 'p', long, env = "TARGET_PATH")]
    pub target_path: Option<PathBuf>,

    /// Branch to compare when cloning
    #[arg(short, long, env = "BRANCH")]
    pub branch: Option<String>,

    /// Tag to compare when cloning
    #[arg(short, long, env = "TAG")]
    pub tag: Option<String>,

    /// Parent directory for the temporary clone
    #[arg(long, env = "TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Output report file (default: report.html)
    #[arg(short, long, env = "OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,

    /// Paths to exclude (comma separated or repeated)
    #[arg(short, long, value_delimiter = ',', env = "EXCLUDE_PATHS")]
    pub exclude_paths: Vec<String>,

    /// Respect per-directory ignore files
    #[arg(long, num_args = 0..=1, default_missing_value = "true", env = "RESPECT_GITIGNORE")]
    pub respect_gitignore: Option<bool>,

    /// Name of the per-directory ignore file
    #[arg(long, env = "IGNORE_FILE_NAME")]
    pub ignore_file_name: Option<String>,

    /// Print the comparison as JSON instead of writing the HTML report
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::parse_from([
            "gitparator",
            "compare",
            "-p",
            "../other",
            "-e",
            "*.lock,dist/**",
            "--respect-gitignore",
            "false",
        ]);

        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.target_path, Some(PathBuf::from("../other")));
                assert_eq!(args.exclude_paths, vec!["*.lock", "dist/**"]);
                assert_eq!(args.respect_gitignore, Some(false));
                assert_eq!(args.source, PathBuf::from("."));
            },
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_parse_check_ignore() {
        let cli = Cli::parse_from(["gitparator", "check-ignore", "--root", "repo", "a.log", "b/c.txt"]);

        match cli.command {
            Commands::CheckIgnore { root, paths, .. } => {
                assert_eq!(root, PathBuf::from("repo"));
                assert_eq!(paths, vec!["a.log", "b/c.txt"]);
            },
            _ => panic!("expected check-ignore"),
        }
    }
}
