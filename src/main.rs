//! Gitparator CLI
//!
//! Command-line interface for comparing directory trees.

use anyhow::Result;
use clap::Parser;
use gitparator::cli::{commands, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.color.as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => {},
    }

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compare(args) => commands::compare::execute(args, cli.quiet),
        Commands::CheckIgnore {
            root,
            paths,
            exclude,
            ignore_file_name,
            non_matching,
            json,
        } => commands::check_ignore::execute(&root, paths, exclude, ignore_file_name, non_matching, json),
        Commands::Completion { shell } => commands::completion::execute(shell, cli.quiet),
    }
}
