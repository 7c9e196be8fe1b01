// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.
//!
//! These are always registered. Each honours `always` / `never`, except the
//! length rules where `never` has no useful meaning and is ignored.

use crate::commit::CommitRecord;
use crate::config::{Applicability, RuleValue};
use crate::error::RuleError;

use super::case::Case;
use super::rule::{Rule, ValueKind, Verdict};

/// The closed set of built-in rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinRule {
    TypeEnum,
    TypeCase,
    TypeEmpty,
    ScopeEnum,
    ScopeCase,
    ScopeEmpty,
    SubjectCase,
    SubjectEmpty,
    SubjectFullStop,
    HeaderMaxLength,
    HeaderMinLength,
    BodyLeadingBlank,
    BodyMaxLineLength,
    FooterLeadingBlank,
    FooterMaxLineLength,
}

impl BuiltinRule {
    /// Get all built-in rules.
    pub fn all() -> &'static [BuiltinRule] {
        &[
            BuiltinRule::TypeEnum,
            BuiltinRule::TypeCase,
            BuiltinRule::TypeEmpty,
            BuiltinRule::ScopeEnum,
            BuiltinRule::ScopeCase,
            BuiltinRule::ScopeEmpty,
            BuiltinRule::SubjectCase,
            BuiltinRule::SubjectEmpty,
            BuiltinRule::SubjectFullStop,
            BuiltinRule::HeaderMaxLength,
            BuiltinRule::HeaderMinLength,
            BuiltinRule::BodyLeadingBlank,
            BuiltinRule::BodyMaxLineLength,
            BuiltinRule::FooterLeadingBlank,
            BuiltinRule::FooterMaxLineLength,
        ]
    }

    /// Get the configuration name of the rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinRule::TypeEnum => "type-enum",
            BuiltinRule::TypeCase => "type-case",
            BuiltinRule::TypeEmpty => "type-empty",
            BuiltinRule::ScopeEnum => "scope-enum",
            BuiltinRule::ScopeCase => "scope-case",
            BuiltinRule::ScopeEmpty => "scope-empty",
            BuiltinRule::SubjectCase => "subject-case",
            BuiltinRule::SubjectEmpty => "subject-empty",
            BuiltinRule::SubjectFullStop => "subject-full-stop",
            BuiltinRule::HeaderMaxLength => "header-max-length",
            BuiltinRule::HeaderMinLength => "header-min-length",
            BuiltinRule::BodyLeadingBlank => "body-leading-blank",
            BuiltinRule::BodyMaxLineLength => "body-max-line-length",
            BuiltinRule::FooterLeadingBlank => "footer-leading-blank",
            BuiltinRule::FooterMaxLineLength => "footer-max-line-length",
        }
    }

    fn missing(&self, expected: &str) -> RuleError {
        RuleError::MissingValue {
            rule: self.as_str().to_string(),
            expected: expected.to_string(),
        }
    }

    fn number(&self, value: Option<&RuleValue>) -> Result<usize, RuleError> {
        match value {
            Some(RuleValue::Number(n)) => Ok(*n),
            _ => Err(self.missing("number")),
        }
    }

    fn list<'a>(&self, value: Option<&'a RuleValue>) -> Result<Vec<&'a str>, RuleError> {
        value
            .and_then(RuleValue::as_list)
            .ok_or_else(|| self.missing("list"))
    }

    fn cases(&self, value: Option<&RuleValue>) -> Result<Vec<Case>, RuleError> {
        let value = value.ok_or_else(|| self.missing("case"))?;
        Case::parse_value(value).map_err(|message| RuleError::Failed {
            rule: self.as_str().to_string(),
            message,
        })
    }
}

impl Rule for BuiltinRule {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn expects(&self) -> ValueKind {
        match self {
            BuiltinRule::TypeEnum | BuiltinRule::ScopeEnum => ValueKind::List,
            BuiltinRule::TypeCase | BuiltinRule::ScopeCase | BuiltinRule::SubjectCase => {
                ValueKind::Case
            }
            BuiltinRule::SubjectFullStop => ValueKind::OptionalText,
            BuiltinRule::HeaderMaxLength
            | BuiltinRule::HeaderMinLength
            | BuiltinRule::BodyMaxLineLength
            | BuiltinRule::FooterMaxLineLength => ValueKind::Number,
            BuiltinRule::TypeEmpty
            | BuiltinRule::ScopeEmpty
            | BuiltinRule::SubjectEmpty
            | BuiltinRule::BodyLeadingBlank
            | BuiltinRule::FooterLeadingBlank => ValueKind::None,
        }
    }

    fn check(
        &self,
        commit: &CommitRecord,
        when: Applicability,
        value: Option<&RuleValue>,
    ) -> Result<Verdict, RuleError> {
        let verb = when.verb();

        let verdict = match self {
            BuiltinRule::TypeEnum => {
                let allowed = self.list(value)?;
                match commit.commit_type.as_deref() {
                    None => Verdict::pass(),
                    Some(commit_type) => Verdict::check(
                        when.apply(allowed.contains(&commit_type)),
                        format!("type {} be one of [{}]", verb, allowed.join(", ")),
                    ),
                }
            }
            BuiltinRule::TypeCase => {
                let cases = self.cases(value)?;
                match commit.commit_type.as_deref() {
                    None => Verdict::pass(),
                    Some(commit_type) => Verdict::check(
                        when.apply(cases.iter().any(|case| case.matches(commit_type))),
                        format!("type {} be {}", verb, join_cases(&cases)),
                    ),
                }
            }
            BuiltinRule::TypeEmpty => Verdict::check(
                when.apply(commit.commit_type.is_none()),
                format!("type {} be empty", verb),
            ),
            BuiltinRule::ScopeEnum => {
                let allowed = self.list(value)?;
                let scopes = commit.scopes();
                if scopes.is_empty() {
                    Verdict::pass()
                } else {
                    let ok = match when {
                        Applicability::Always => scopes.iter().all(|s| allowed.contains(s)),
                        Applicability::Never => !scopes.iter().any(|s| allowed.contains(s)),
                    };
                    Verdict::check(
                        ok,
                        format!("scope {} be one of [{}]", verb, allowed.join(", ")),
                    )
                }
            }
            BuiltinRule::ScopeCase => {
                let cases = self.cases(value)?;
                let scopes = commit.scopes();
                if scopes.is_empty() {
                    Verdict::pass()
                } else {
                    let holds = scopes
                        .iter()
                        .all(|scope| cases.iter().any(|case| case.matches(scope)));
                    Verdict::check(
                        when.apply(holds),
                        format!("scope {} be {}", verb, join_cases(&cases)),
                    )
                }
            }
            BuiltinRule::ScopeEmpty => Verdict::check(
                when.apply(commit.scope.is_none()),
                format!("scope {} be empty", verb),
            ),
            BuiltinRule::SubjectCase => {
                let cases = self.cases(value)?;
                match commit.subject.as_deref() {
                    None => Verdict::pass(),
                    Some(subject) => Verdict::check(
                        when.apply(cases.iter().any(|case| case.matches(subject))),
                        format!("subject {} be {}", verb, join_cases(&cases)),
                    ),
                }
            }
            BuiltinRule::SubjectEmpty => Verdict::check(
                when.apply(commit.subject.is_none()),
                format!("subject {} be empty", verb),
            ),
            BuiltinRule::SubjectFullStop => {
                let stop = match value {
                    Some(RuleValue::Text(stop)) => stop.as_str(),
                    _ => ".",
                };
                match commit.subject.as_deref() {
                    None => Verdict::pass(),
                    Some(subject) => Verdict::check(
                        when.apply(subject.ends_with(stop)),
                        format!("subject {} end with full stop '{}'", verb, stop),
                    ),
                }
            }
            BuiltinRule::HeaderMaxLength => {
                let max = self.number(value)?;
                let len = commit.header.chars().count();
                Verdict::check(
                    len <= max,
                    format!(
                        "header must not be longer than {} characters, current length is {}",
                        max, len
                    ),
                )
            }
            BuiltinRule::HeaderMinLength => {
                let min = self.number(value)?;
                let len = commit.header.chars().count();
                Verdict::check(
                    len >= min,
                    format!(
                        "header must not be shorter than {} characters, current length is {}",
                        min, len
                    ),
                )
            }
            BuiltinRule::BodyLeadingBlank => {
                if commit.body.is_none() && commit.footer.is_none() {
                    Verdict::pass()
                } else {
                    Verdict::check(
                        when.apply(commit.has_blank_after_header()),
                        format!("body {} have leading blank line", verb),
                    )
                }
            }
            BuiltinRule::BodyMaxLineLength => {
                let max = self.number(value)?;
                Verdict::check(
                    lines_within(commit.body.as_deref(), max),
                    format!("body's lines must not be longer than {} characters", max),
                )
            }
            BuiltinRule::FooterLeadingBlank => {
                if commit.footer.is_none() {
                    Verdict::pass()
                } else {
                    Verdict::check(
                        when.apply(commit.has_blank_before_footer()),
                        format!("footer {} have leading blank line", verb),
                    )
                }
            }
            BuiltinRule::FooterMaxLineLength => {
                let max = self.number(value)?;
                Verdict::check(
                    lines_within(commit.footer.as_deref(), max),
                    format!("footer's lines must not be longer than {} characters", max),
                )
            }
        };

        Ok(verdict)
    }
}

fn join_cases(cases: &[Case]) -> String {
    cases
        .iter()
        .map(Case::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn lines_within(text: Option<&str>, max: usize) -> bool {
    text.map_or(true, |text| {
        text.lines().all(|line| line.chars().count() <= max)
    })
}
