// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// clint - commit message linter
///
/// Checks commit messages against configurable rules.
#[derive(Parser, Debug)]
#[command(name = "clint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Commit message linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to lint if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lint commit messages (default command)
    Lint(LintArgs),

    /// List registered rules
    Rules,

    /// Print the resolved configuration
    PrintConfig,

    /// Initialize clint configuration
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the lint command.
///
/// Without `--edit`, `--message`, `--from` or `--to` the message is read
/// from stdin.
#[derive(Parser, Debug, Default, Clone)]
pub struct LintArgs {
    /// Read the message from a file, as in a commit-msg hook
    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_missing_value = ".git/COMMIT_EDITMSG",
        conflicts_with_all = ["message", "from", "to"]
    )]
    pub edit: Option<PathBuf>,

    /// Lint the given message
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    pub message: Option<String>,

    /// Lint commits after this reference
    #[arg(long)]
    pub from: Option<String>,

    /// Lint commits up to this reference (default: HEAD)
    #[arg(long)]
    pub to: Option<String>,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Get the effective command, defaulting to Lint if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Lint(LintArgs::default()))
    }
}
