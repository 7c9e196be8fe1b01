// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! clint - commit message linter
//!
//! Evaluates commit messages against a configurable set of named rules,
//! each with a severity, an applicability and an optional value.
//!
//! # Features
//!
//! - **Rule Engine**: Built-in header, body and footer rules
//! - **Presets**: `extends = ["conventional"]` with local overrides
//! - **Plugins**: JIRA ticket and team guideline rule groups
//! - **Ignores**: Merge, revert and release commits are skipped
//! - **Monorepo**: Package directories become allowed scopes
//!
//! # Example
//!
//! ```no_run
//! use clint::config::Config;
//! use clint::rules::{Linter, Status};
//!
//! let linter = Linter::from_config(Config::load().unwrap()).unwrap();
//! let evaluation = linter.lint("feat(api): add login endpoint");
//! assert_eq!(evaluation.status(), Some(Status::Accept));
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod monorepo;
pub mod rules;

// Re-exports for convenience
pub use commit::CommitRecord;
pub use config::Config;
pub use error::{ClintError, Result};
pub use rules::{Evaluation, Linter};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of clint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// `git describe` output at compile time (if available).
    pub const GIT_DESCRIBE: Option<&str> = option_env!("VERGEN_GIT_DESCRIBE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_DESCRIBE, GIT_SHA) {
            (Some(describe), _) => format!("{} ({})", VERSION, describe),
            (None, Some(sha)) => {
                let short: String = sha.chars().take(7).collect();
                format!("{} ({})", VERSION, short)
            }
            _ => VERSION.to_string(),
        }
    }
}
