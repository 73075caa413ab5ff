use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

const BIN_NAME: &str = "gitparator";

/// Generate shell completion scripts
///
/// The script goes to stdout so it can be piped or eval'd. Install hints go to stderr.
pub fn execute(shell: Shell, quiet: bool) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());

    if quiet {
        return Ok(());
    }

    eprintln!("\n{}", "Installation Instructions:".bold());
    match shell {
        Shell::Bash => {
            eprintln!("  Add the following to your ~/.bashrc or ~/.bash_profile:");
            eprintln!("  {}", "eval \"$(gitparator completion bash)\"".cyan());
        },
        Shell::Zsh => {
            eprintln!("  Save the script to a file in your fpath:");
            eprintln!(
                "  {}",
                "gitparator completion zsh > ~/.local/share/zsh/site-functions/_gitparator".cyan()
            );
        },
        Shell::Fish => {
            eprintln!("  Save the completion script:");
            eprintln!(
                "  {}",
                "gitparator completion fish > ~/.config/fish/completions/gitparator.fish".cyan()
            );
        },
        Shell::PowerShell => {
            eprintln!("  Add the following to your PowerShell profile:");
            eprintln!("  {}", "Invoke-Expression (& gitparator completion powershell)".cyan());
        },
        _ => {
            eprintln!("  Please refer to your shell's documentation for installing completion scripts.");
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_generation() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
            let mut cmd = Cli::command();
            let mut output = Vec::new();
            generate(shell, &mut cmd, BIN_NAME, &mut output);

            assert!(!output.is_empty(), "No completion script generated for {:?}", shell);
            assert!(String::from_utf8_lossy(&output).contains("check-ignore"));
        }
    }
}
