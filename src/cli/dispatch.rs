// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::default::example_config;
use crate::config::Config;
use crate::error::{ClintError, LintError, Result, ResultExt};
use crate::rules::{Evaluation, Linter, Status};

use super::args::{Cli, Commands, InitArgs, LintArgs, OutputFormat};

/// Git truncates the message at this line in verbose commit templates.
const SCISSORS: &str = "# ------------------------ >8 ------------------------";

const DEFAULT_EDIT_PATH: &str = ".git/COMMIT_EDITMSG";

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match cli.effective_command() {
        Commands::Lint(args) => run_lint(&cli, args),
        Commands::Rules => run_rules(&cli),
        Commands::PrintConfig => run_print_config(&cli),
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(config_path) = &cli.config {
        Config::load_from(config_path)
    } else {
        Config::load()
    }
}

/// Run the lint command.
fn run_lint(cli: &Cli, args: LintArgs) -> Result<()> {
    tracing::debug!("Running lint command with args: {:?}", args);

    let linter = Linter::from_config(load_config(cli)?)?;

    let evaluations = if args.from.is_some() {
        let range = format!(
            "{}..{}",
            args.from.as_deref().unwrap_or_default(),
            args.to.as_deref().unwrap_or("HEAD")
        );
        linter.lint_range(&range)?
    } else if let Some(ref reference) = args.to {
        vec![linter.lint_commit(reference)?]
    } else {
        let message = match (&args.edit, &args.message) {
            (Some(path), _) => read_edit_file(path)?,
            (None, Some(message)) => message.clone(),
            (None, None) => read_stdin()?,
        };
        if is_blank_message(&message) {
            return Err(LintError::EmptyInput.into());
        }
        vec![linter.lint(&message)]
    };

    print_evaluations(&evaluations, cli.format, linter.help_url());
    exit_status(&evaluations, args.strict)
}

fn print_evaluations(
    evaluations: &[Evaluation],
    format: Option<OutputFormat>,
    help_url: Option<&str>,
) {
    match (format, evaluations) {
        (Some(OutputFormat::Json), [_, _, ..]) => {
            let all: Vec<_> = evaluations.iter().map(Evaluation::to_json).collect();
            println!("{}", serde_json::to_string_pretty(&all).unwrap_or_default());
        }
        _ => {
            for evaluation in evaluations {
                println!("{}", evaluation.render(format, help_url));
            }
        }
    }
}

/// Map evaluations to the command result: rejects always fail, warnings
/// fail only in strict mode.
fn exit_status(evaluations: &[Evaluation], strict: bool) -> Result<()> {
    let count = |status: Status| {
        evaluations
            .iter()
            .filter(|e| e.status() == Some(status))
            .count()
    };

    let rejected = count(Status::Reject);
    if rejected > 0 {
        return Err(LintError::Rejected { count: rejected }.into());
    }

    let warned = count(Status::AcceptWithWarnings);
    if strict && warned > 0 {
        return Err(LintError::WarningsInStrictMode { count: warned }.into());
    }

    Ok(())
}

/// Read a commit message file, dropping everything below the scissors line.
fn read_edit_file(path: &Path) -> Result<String> {
    let path = resolve_edit_path(path);
    tracing::debug!("Reading commit message from {}", path.display());

    let content = std::fs::read_to_string(&path).context(format!("{}", path.display()))?;
    let message = match content.find(SCISSORS) {
        Some(index) => content[..index].to_string(),
        None => content,
    };
    Ok(message)
}

/// The default path is relative to the repository's git directory, so hooks
/// work from any subdirectory.
fn resolve_edit_path(path: &Path) -> PathBuf {
    if path != Path::new(DEFAULT_EDIT_PATH) || path.exists() {
        return path.to_path_buf();
    }
    crate::git::Repository::open_current()
        .map(|repo| repo.git_dir().join("COMMIT_EDITMSG"))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn read_stdin() -> Result<String> {
    let mut message = String::new();
    std::io::stdin().read_to_string(&mut message)?;
    Ok(message)
}

fn is_blank_message(message: &str) -> bool {
    message
        .lines()
        .all(|line| line.trim().is_empty() || line.starts_with('#'))
}

/// Run the rules command.
fn run_rules(cli: &Cli) -> Result<()> {
    let linter = Linter::from_config(load_config(cli)?)?;
    let configured = linter.rules();

    if cli.format == Some(OutputFormat::Json) {
        let rules: Vec<_> = linter
            .registry()
            .iter()
            .map(|rule| {
                serde_json::json!({
                    "name": rule.name(),
                    "expects": rule.expects().describe(),
                    "severity": configured.get(rule.name()).map(|s| s.severity),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rules).unwrap_or_default());
        return Ok(());
    }

    for rule in linter.registry().iter() {
        let severity = configured
            .get(rule.name())
            .map_or("-", |setting| setting.severity.as_str());
        println!(
            "{:<24} {:<22} {}",
            rule.name(),
            console::style(rule.expects().describe()).dim(),
            severity
        );
    }

    Ok(())
}

/// Run the print-config command.
fn run_print_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let rules = config.resolve()?;
    let resolved = Config {
        extends: Vec::new(),
        scopes: None,
        rules,
        ..config
    };

    if cli.format == Some(OutputFormat::Json) {
        println!(
            "{}",
            serde_json::to_string_pretty(&resolved).context("print-config")?
        );
    } else {
        print!("{}", toml::to_string_pretty(&resolved).context("print-config")?);
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("clint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new("clint.toml");

    if config_path.exists() && !args.force {
        return Err(ClintError::WithContext {
            context: "init".to_string(),
            message: "clint.toml already exists. Use --force to overwrite.".to_string(),
        });
    }

    std::fs::write(config_path, example_config()).context("init")?;

    println!("{} Created clint.toml", console::style("✓").green());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::EvaluationReport;
    use tempfile::TempDir;

    #[test]
    fn test_read_edit_file_drops_scissors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        std::fs::write(
            &path,
            format!("feat: add login\n\n{}\ndiff --git a/x b/x\n", SCISSORS),
        )
        .unwrap();

        assert_eq!(read_edit_file(&path).unwrap(), "feat: add login\n\n");
    }

    #[test]
    fn test_read_edit_file_missing() {
        let dir = TempDir::new().unwrap();
        let result = read_edit_file(&dir.path().join("nope"));
        assert!(matches!(result, Err(ClintError::WithContext { .. })));
    }

    #[test]
    fn test_blank_message() {
        assert!(is_blank_message(""));
        assert!(is_blank_message("\n# Please enter the commit message\n"));
        assert!(!is_blank_message("feat: x\n# comment"));
    }

    #[test]
    fn test_exit_status() {
        let skipped = Evaluation::Skipped {
            predicate: "merge-commit".to_string(),
        };
        let accepted = Evaluation::Report(EvaluationReport::new("feat: x"));
        assert!(exit_status(&[skipped.clone(), accepted.clone()], true).is_ok());

        let linter = Linter::from_config(Config::default()).unwrap();
        let warned = linter.lint("fix: x\nno blank line");
        assert!(exit_status(&[accepted.clone(), warned.clone()], false).is_ok());
        assert!(matches!(
            exit_status(&[warned], true),
            Err(ClintError::Lint(LintError::WarningsInStrictMode { count: 1 }))
        ));

        let rejected = linter.lint("wip: Stuff.");
        assert!(matches!(
            exit_status(&[accepted, rejected], false),
            Err(ClintError::Lint(LintError::Rejected { count: 1 }))
        ));
    }
}
