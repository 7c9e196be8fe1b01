// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! Rules are looked up by name in a [`RuleRegistry`] and run by a
//! [`Linter`] in the order they are configured.

mod builtin;
mod case;
mod engine;
mod ignore;
mod plugins;
mod registry;
mod report;
mod rule;

pub use builtin::BuiltinRule;
pub use case::Case;
pub use engine::Linter;
pub use ignore::{
    default_ignores, Contains, IgnorePredicate, IgnoreSet, Matches, StartsWith, VersionBump,
};
pub use plugins::{builtin_plugin, GuidelinesPlugin, JiraPlugin, Plugin, BUILTIN_PLUGINS};
pub use registry::RuleRegistry;
pub use report::{Evaluation, EvaluationReport, RuleOutcome, Status};
pub use rule::{Rule, ValueKind, Verdict};
