// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The rule capability shared by built-in and plugin rules.

use crate::commit::CommitRecord;
use crate::config::{Applicability, RuleValue};
use crate::error::RuleError;

use super::case::Case;

/// Result of running one rule against one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub ok: bool,
    /// Describes the failure; empty when `ok` is true.
    pub message: String,
}

impl Verdict {
    /// A passing verdict.
    pub fn pass() -> Self {
        Self {
            ok: true,
            message: String::new(),
        }
    }

    /// A failing verdict with a message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }

    /// Pass when `ok`, otherwise fail with `message`.
    pub fn check(ok: bool, message: impl Into<String>) -> Self {
        if ok {
            Self::pass()
        } else {
            Self::fail(message)
        }
    }
}

/// The kind of configuration value a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// The rule takes no value; any value is ignored.
    None,
    Number,
    OptionalNumber,
    OptionalText,
    List,
    OptionalList,
    /// One case name or a list of case names.
    Case,
}

impl ValueKind {
    /// Describe the kind for listings and errors.
    pub fn describe(&self) -> &'static str {
        match self {
            ValueKind::None => "no value",
            ValueKind::Number => "number",
            ValueKind::OptionalNumber => "optional number",
            ValueKind::OptionalText => "optional text",
            ValueKind::List => "list",
            ValueKind::OptionalList => "optional list",
            ValueKind::Case => "case or list of cases",
        }
    }

    /// Check that a configured value fits this kind.
    pub fn validate(&self, value: Option<&RuleValue>) -> Result<(), String> {
        let fits = match (self, value) {
            (ValueKind::None, _) => true,
            (ValueKind::Number, Some(RuleValue::Number(_))) => true,
            (ValueKind::OptionalNumber, None | Some(RuleValue::Number(_))) => true,
            (ValueKind::OptionalText, None | Some(RuleValue::Text(_))) => true,
            (ValueKind::List, Some(RuleValue::List(_))) => true,
            (ValueKind::OptionalList, None | Some(RuleValue::List(_))) => true,
            (ValueKind::Case, Some(value @ (RuleValue::Text(_) | RuleValue::List(_)))) => {
                return Case::parse_value(value).map(|_| ());
            }
            _ => false,
        };

        if fits {
            Ok(())
        } else {
            Err(format!(
                "expected {}, found {}",
                self.describe(),
                value.map_or("nothing", RuleValue::kind)
            ))
        }
    }
}

/// A named, pure check over a commit record.
///
/// Implementations must be deterministic and side-effect free. Returning
/// `Err` marks the rule as crashed; the evaluator turns that into an
/// error-severity failure.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Get the rule name as used in configuration.
    fn name(&self) -> &str;

    /// The configuration value this rule reads.
    fn expects(&self) -> ValueKind {
        ValueKind::None
    }

    /// Check the commit.
    fn check(
        &self,
        commit: &CommitRecord,
        when: Applicability,
        value: Option<&RuleValue>,
    ) -> Result<Verdict, RuleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_check() {
        assert_eq!(Verdict::check(true, "ignored"), Verdict::pass());
        let verdict = Verdict::check(false, "bad");
        assert!(!verdict.ok);
        assert_eq!(verdict.message, "bad");
    }

    #[test]
    fn test_value_kind_validate() {
        assert!(ValueKind::Number.validate(Some(&RuleValue::Number(3))).is_ok());
        assert!(ValueKind::Number.validate(None).is_err());
        assert!(ValueKind::OptionalNumber.validate(None).is_ok());
        assert!(ValueKind::List
            .validate(Some(&RuleValue::Text("feat".to_string())))
            .is_err());
        assert!(ValueKind::None
            .validate(Some(&RuleValue::Number(1)))
            .is_ok());
    }

    #[test]
    fn test_value_kind_case() {
        let good = RuleValue::List(vec!["lower-case".to_string(), "kebab-case".to_string()]);
        assert!(ValueKind::Case.validate(Some(&good)).is_ok());

        let bad = RuleValue::Text("shouting-case".to_string());
        let err = ValueKind::Case.validate(Some(&bad)).unwrap_err();
        assert!(err.contains("shouting-case"));

        assert!(ValueKind::Case.validate(None).is_err());
    }
}
