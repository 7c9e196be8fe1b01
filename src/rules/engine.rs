// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule evaluator for commit messages.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::commit::{CommitRecord, HeaderParser};
use crate::config::{Config, RuleConfig, RuleSetting, Severity};
use crate::error::{ConfigError, Result, RuleError};
use crate::git::Repository;

use super::ignore::IgnoreSet;
use super::registry::RuleRegistry;
use super::report::{Evaluation, EvaluationReport, RuleOutcome};
use super::rule::Rule;

/// Evaluates commits against a resolved rule configuration.
///
/// Holds no mutable state: evaluating the same commit twice yields the same
/// result, and one linter can be shared across threads.
#[derive(Debug)]
pub struct Linter {
    rules: RuleConfig,
    registry: RuleRegistry,
    ignores: IgnoreSet,
    parser: HeaderParser,
    help_url: Option<String>,
}

impl Linter {
    /// Create a linter, validating the configuration against the registry.
    ///
    /// Every enabled rule must be registered and have a value of the kind it
    /// expects. Disabled rules are not checked.
    pub fn new(config: Config, registry: RuleRegistry) -> Result<Self> {
        let rules = config.resolve()?;

        for (name, setting) in rules.enabled() {
            let rule = registry.get(name).ok_or_else(|| ConfigError::UnknownRule {
                name: name.to_string(),
            })?;
            rule.expects()
                .validate(setting.value.as_ref())
                .map_err(|message| ConfigError::InvalidValue {
                    key: format!("rules.{}", name),
                    message,
                })?;
        }

        let ignores = IgnoreSet::from_config(&config)?;
        let parser = HeaderParser::from_config(&config.parser)?;

        tracing::debug!(
            "Linter ready: {} enabled rules, {} ignore predicates",
            rules.enabled().count(),
            ignores.len()
        );

        Ok(Self {
            rules,
            registry,
            ignores,
            parser,
            help_url: config.help_url,
        })
    }

    /// Create a linter with the built-in rules and configured plugins.
    pub fn from_config(config: Config) -> Result<Self> {
        let registry = RuleRegistry::for_config(&config)?;
        Self::new(config, registry)
    }

    /// The resolved rule configuration.
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// The registry rules are looked up in.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn help_url(&self) -> Option<&str> {
        self.help_url.as_deref()
    }

    /// Parse a raw message with the configured header pattern.
    pub fn parse(&self, raw: &str) -> CommitRecord {
        self.parser.parse(raw)
    }

    /// Evaluate a commit.
    ///
    /// An ignored commit is skipped before any rule runs. Otherwise every
    /// enabled rule runs in configured order; a rule that errors or panics is
    /// reported as an error-severity failure.
    pub fn evaluate(&self, commit: &CommitRecord) -> Evaluation {
        if let Some(predicate) = self.ignores.first_match(&commit.raw) {
            tracing::debug!("Skipping '{}': {}", commit.header, predicate.name());
            return Evaluation::Skipped {
                predicate: predicate.name().to_string(),
            };
        }

        let mut report = EvaluationReport::new(commit.header.clone());
        for (name, setting) in self.rules.enabled() {
            // Names were validated in `new`.
            let Some(rule) = self.registry.get(name) else {
                continue;
            };
            let outcome = run_rule(name, rule, commit, setting);
            tracing::debug!("{} -> ok={} ({})", name, outcome.ok, outcome.severity);
            report.outcomes.push(outcome);
        }

        Evaluation::Report(report)
    }

    /// Parse and evaluate a raw message.
    pub fn lint(&self, raw: &str) -> Evaluation {
        self.evaluate(&self.parse(raw))
    }

    /// Evaluate a batch of messages independently.
    pub fn lint_many<'a, I>(&self, messages: I) -> Vec<Evaluation>
    where
        I: IntoIterator<Item = &'a str>,
    {
        messages.into_iter().map(|raw| self.lint(raw)).collect()
    }

    /// Lint a specific commit of the current repository by reference.
    pub fn lint_commit(&self, reference: &str) -> Result<Evaluation> {
        self.lint_commit_in(&Repository::open_current()?, reference)
    }

    /// Lint a commit of `repo`. The report carries the resolved commit id,
    /// not the reference.
    pub fn lint_commit_in(&self, repo: &Repository, reference: &str) -> Result<Evaluation> {
        let (oid, message) = repo.get_commit_message(reference)?;
        Ok(self.lint(&message).with_commit_sha(oid.to_string()))
    }

    /// Lint every commit of the current repository in a range such as
    /// `main..HEAD`.
    pub fn lint_range(&self, range: &str) -> Result<Vec<Evaluation>> {
        self.lint_range_in(&Repository::open_current()?, range)
    }

    /// Lint every commit of `repo` in a range, oldest first.
    pub fn lint_range_in(&self, repo: &Repository, range: &str) -> Result<Vec<Evaluation>> {
        let commits = repo.get_commits_in_range(range)?;
        Ok(commits
            .into_iter()
            .map(|(oid, message)| self.lint(&message).with_commit_sha(oid.to_string()))
            .collect())
    }
}

fn run_rule(
    name: &str,
    rule: &dyn Rule,
    commit: &CommitRecord,
    setting: &RuleSetting,
) -> RuleOutcome {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        rule.check(commit, setting.when, setting.value.as_ref())
    }))
    .unwrap_or_else(|payload| {
        Err(RuleError::Panicked {
            rule: name.to_string(),
            message: panic_message(payload.as_ref()),
        })
    });

    match result {
        Ok(verdict) => RuleOutcome {
            name: name.to_string(),
            severity: setting.severity,
            ok: verdict.ok,
            message: if verdict.ok { String::new() } else { verdict.message },
        },
        Err(err) => {
            tracing::warn!("Rule '{}' crashed: {}", name, err);
            RuleOutcome {
                name: name.to_string(),
                severity: Severity::Error,
                ok: false,
                message: err.to_string(),
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
