// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for clint.
//!
//! Rule failures are not errors: they are reported as outcomes in an
//! [`EvaluationReport`](crate::rules::EvaluationReport). The types here cover
//! configuration problems (fatal before any commit is linted), rule crashes
//! (converted into error-severity outcomes), and the git/IO plumbing of the
//! command line host.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for clint operations.
#[derive(Error, Debug)]
pub enum ClintError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Lint outcome surfaced to the CLI
    #[error("Lint error: {0}")]
    Lint(#[from] LintError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown rule '{name}' (is the plugin providing it enabled?)")]
    UnknownRule { name: String },

    #[error("Unknown preset '{name}' in extends")]
    UnknownPreset { name: String },

    #[error("Unknown plugin '{name}'")]
    UnknownPlugin { name: String },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// A rule that could not produce a verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule '{rule}' requires a {expected} value")]
    MissingValue { rule: String, expected: String },

    #[error("rule '{rule}' panicked: {message}")]
    Panicked { rule: String, message: String },

    #[error("rule '{rule}' failed: {message}")]
    Failed { rule: String, message: String },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

/// Errors reported by the lint command once evaluation is complete.
#[derive(Error, Debug)]
pub enum LintError {
    #[error("{count} commit(s) rejected")]
    Rejected { count: usize },

    #[error("{count} commit(s) have warnings (strict mode)")]
    WarningsInStrictMode { count: usize },

    #[error("No commit message to lint")]
    EmptyInput,
}

/// Result type alias for clint operations.
pub type Result<T> = std::result::Result<T, ClintError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ClintError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
