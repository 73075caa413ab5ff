//! Compare command implementation

use crate::cli::CompareArgs;
use crate::compare::{compare_trees, ComparisonResult};
use crate::config::{CompareConfig, ConfigOverrides};
use crate::ignore::{ExclusionFilter, TreeScanner};
use crate::report;
use crate::source::TargetSource;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Execute the compare command
pub fn execute(args: CompareArgs, quiet: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let (mut config, config_file) = CompareConfig::discover(args.config.as_deref(), &cwd)?;

    match &config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using CLI flags and defaults"),
    }

    config.apply_overrides(ConfigOverrides {
        target_url: args.target_url,
        target_path: args.target_path,
        branch: args.branch,
        tag: args.tag,
        temp_dir: args.temp_dir,
        output_file: args.output_file,
        exclude_paths: args.exclude_paths,
        respect_gitignore: args.respect_gitignore,
        ignore_file_name: args.ignore_file_name,
    });
    config.validate()?;

    let target = TargetSource::from_config(&config)?
        .prepare()
        .context("Failed to prepare target tree")?;

    let result = run_comparison(&args.source, target.path(), &config)?;

    if args.json {
        println!("{}", report::render_json(&result)?);
        return Ok(());
    }

    report::write_html(&result, &config.output_file)?;

    if !quiet {
        print_summary(&result, &config.output_file);
    }

    Ok(())
}

/// Scan both trees with independent ignore stacks and compare them
pub fn run_comparison(source: &Path, target: &Path, config: &CompareConfig) -> Result<ComparisonResult> {
    let filter = ExclusionFilter::new(config.exclude_paths.clone(), config.ignore_file_name.clone());

    let scan = |root: &Path| {
        TreeScanner::new(root)
            .with_filter(filter.clone())
            .respect_ignore_files(config.respect_gitignore)
            .scan()
            .with_context(|| format!("Failed to scan {}", root.display()))
    };

    let source_scan = scan(source)?;
    let target_scan = scan(target)?;

    Ok(compare_trees(&source_scan, &target_scan))
}

fn print_summary(result: &ComparisonResult, output_file: &Path) {
    let summary = result.summary();

    println!("{}", "Comparison complete".bright_blue().bold());
    println!("  {} {}", "Identical:".green(), summary.identical);
    println!("  {} {}", "Different:".red(), summary.different);
    println!("  {} {}", "Source only:".blue(), summary.source_only);
    println!("  {} {}", "Target only:".yellow(), summary.target_only);
    println!("  {} {}", "Excluded:".dimmed(), summary.excluded);
    println!();
    println!(
        "{} Report generated as {}",
        "✓".green().bold(),
        output_file.display().to_string().cyan()
    );
}
