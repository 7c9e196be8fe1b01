// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Plugin rule groups.
//!
//! A plugin is a named group of extra rules. Its rules only exist in the
//! registry when the plugin is listed in the `plugins` configuration key.
//! These rules ignore applicability.

use crate::commit::CommitRecord;
use crate::config::{Applicability, RuleValue};
use crate::error::{ConfigError, RuleError};
use lazy_static::lazy_static;
use regex::Regex;

use super::rule::{Rule, ValueKind, Verdict};

lazy_static! {
    static ref JIRA_TICKET: Regex = Regex::new(r"^[A-Z]+-\d+$").unwrap();
    static ref PROFANITY: Regex = Regex::new(r"(?i)\b(damn|hell|crap)\b").unwrap();
    static ref CO_AUTHOR: Regex = Regex::new(r"(?i)Co-authored-by:").unwrap();
    static ref BREAKING_CHANGE: Regex = Regex::new(r"(?i)BREAKING CHANGE:").unwrap();
}

/// Types exempt from `jira-ticket-required` unless configured otherwise.
const DEFAULT_TICKET_EXEMPT_TYPES: &[&str] = &["chore", "docs", "style"];

/// Body plus footer segments above which a co-author is required.
const DEFAULT_CO_AUTHOR_THRESHOLD: usize = 20;

/// Minimum length of a breaking change explanation.
const DEFAULT_BREAKING_DETAIL_LENGTH: usize = 50;

/// A named group of additional rules.
pub trait Plugin: Send + Sync {
    /// Get the plugin name as used in configuration.
    fn name(&self) -> &str;

    /// The rules this plugin contributes.
    fn rules(&self) -> Vec<Box<dyn Rule>>;
}

/// Names of the plugins shipped with clint.
pub const BUILTIN_PLUGINS: &[&str] = &["jira", "guidelines"];

/// Look up a shipped plugin by name.
pub fn builtin_plugin(name: &str) -> Result<Box<dyn Plugin>, ConfigError> {
    match name {
        "jira" => Ok(Box::new(JiraPlugin)),
        "guidelines" => Ok(Box::new(GuidelinesPlugin)),
        _ => Err(ConfigError::UnknownPlugin {
            name: name.to_string(),
        }),
    }
}

/// JIRA ticket reference rules.
#[derive(Debug, Clone, Copy)]
pub struct JiraPlugin;

impl Plugin for JiraPlugin {
    fn name(&self) -> &str {
        "jira"
    }

    fn rules(&self) -> Vec<Box<dyn Rule>> {
        vec![Box::new(JiraTicketRequired), Box::new(JiraTicketFormat)]
    }
}

/// Team commit guideline rules.
#[derive(Debug, Clone, Copy)]
pub struct GuidelinesPlugin;

impl Plugin for GuidelinesPlugin {
    fn name(&self) -> &str {
        "guidelines"
    }

    fn rules(&self) -> Vec<Box<dyn Rule>> {
        vec![
            Box::new(NoProfanity),
            Box::new(RequireCoAuthor),
            Box::new(BreakingChangeDetail),
        ]
    }
}

/// Body and footer joined by a newline, absent parts as empty strings.
fn body_and_footer(commit: &CommitRecord) -> String {
    format!(
        "{}\n{}",
        commit.body.as_deref().unwrap_or(""),
        commit.footer.as_deref().unwrap_or("")
    )
}

/// Requires a ticket reference, except for exempt commit types.
#[derive(Debug, Clone, Copy)]
pub struct JiraTicketRequired;

impl Rule for JiraTicketRequired {
    fn name(&self) -> &str {
        "jira-ticket-required"
    }

    fn expects(&self) -> ValueKind {
        ValueKind::OptionalList
    }

    fn check(
        &self,
        commit: &CommitRecord,
        _when: Applicability,
        value: Option<&RuleValue>,
    ) -> Result<Verdict, RuleError> {
        let exempt = value
            .and_then(RuleValue::as_list)
            .unwrap_or_else(|| DEFAULT_TICKET_EXEMPT_TYPES.to_vec());

        if let Some(commit_type) = commit.commit_type.as_deref() {
            if exempt.contains(&commit_type) {
                return Ok(Verdict::pass());
            }
        }

        Ok(Verdict::check(
            commit.ticket.is_some(),
            "Commit message must include JIRA ticket reference (e.g., PROJ-123)",
        ))
    }
}

/// Validates the ticket format when a ticket is present.
#[derive(Debug, Clone, Copy)]
pub struct JiraTicketFormat;

impl Rule for JiraTicketFormat {
    fn name(&self) -> &str {
        "jira-ticket-format"
    }

    fn check(
        &self,
        commit: &CommitRecord,
        _when: Applicability,
        _value: Option<&RuleValue>,
    ) -> Result<Verdict, RuleError> {
        // A missing ticket is jira-ticket-required's concern.
        let Some(ticket) = commit.ticket.as_deref() else {
            return Ok(Verdict::pass());
        };

        Ok(Verdict::check(
            JIRA_TICKET.is_match(ticket),
            "JIRA ticket must match format: PROJECT-123",
        ))
    }
}

/// Rejects messages containing inappropriate language.
#[derive(Debug, Clone, Copy)]
pub struct NoProfanity;

impl Rule for NoProfanity {
    fn name(&self) -> &str {
        "no-profanity"
    }

    fn check(
        &self,
        commit: &CommitRecord,
        _when: Applicability,
        _value: Option<&RuleValue>,
    ) -> Result<Verdict, RuleError> {
        Ok(Verdict::check(
            !PROFANITY.is_match(&commit.raw),
            "Commit message contains inappropriate language",
        ))
    }
}

/// Requires a `Co-authored-by:` trailer on large commits.
///
/// Size is the number of newline-delimited segments of the body and footer
/// joined by a newline, so a commit with neither counts as 2.
#[derive(Debug, Clone, Copy)]
pub struct RequireCoAuthor;

impl Rule for RequireCoAuthor {
    fn name(&self) -> &str {
        "require-co-author"
    }

    fn expects(&self) -> ValueKind {
        ValueKind::OptionalNumber
    }

    fn check(
        &self,
        commit: &CommitRecord,
        _when: Applicability,
        value: Option<&RuleValue>,
    ) -> Result<Verdict, RuleError> {
        let threshold = match value {
            Some(RuleValue::Number(n)) => *n,
            _ => DEFAULT_CO_AUTHOR_THRESHOLD,
        };

        let full = body_and_footer(commit);
        let segments = full.split('\n').count();
        if segments <= threshold {
            return Ok(Verdict::pass());
        }

        Ok(Verdict::check(
            CO_AUTHOR.is_match(&full),
            "Large commits should include Co-authored-by: trailer",
        ))
    }
}

/// Requires breaking changes to carry a detailed explanation.
///
/// A change is breaking when the header contains `!` or the body/footer
/// contains `BREAKING CHANGE:`. The explanation is the text following the
/// first marker, up to the next one.
#[derive(Debug, Clone, Copy)]
pub struct BreakingChangeDetail;

impl Rule for BreakingChangeDetail {
    fn name(&self) -> &str {
        "breaking-change-detail"
    }

    fn expects(&self) -> ValueKind {
        ValueKind::OptionalNumber
    }

    fn check(
        &self,
        commit: &CommitRecord,
        _when: Applicability,
        value: Option<&RuleValue>,
    ) -> Result<Verdict, RuleError> {
        let min = match value {
            Some(RuleValue::Number(n)) => *n,
            _ => DEFAULT_BREAKING_DETAIL_LENGTH,
        };

        let full = body_and_footer(commit);
        let has_indicator = commit.header.contains('!');
        let has_note = BREAKING_CHANGE.is_match(&full);
        if !has_indicator && !has_note {
            return Ok(Verdict::pass());
        }

        let detail = BREAKING_CHANGE.split(&full).nth(1).unwrap_or("");
        Ok(Verdict::check(
            detail.trim().chars().count() > min,
            format!(
                "Breaking changes must include detailed explanation (>{} chars)",
                min
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::HeaderParser;
    use crate::config::{HeaderField, ParserConfig};

    fn parse(message: &str) -> CommitRecord {
        HeaderParser::from_config(&ParserConfig {
            header_pattern: r"^(\w+)(?:\(([^)]*)\))?!?: (?:([A-Z]+-\d+) )?(.+)$".to_string(),
            header_correspondence: vec![
                HeaderField::Type,
                HeaderField::Scope,
                HeaderField::Ticket,
                HeaderField::Subject,
            ],
        })
        .unwrap()
        .parse(message)
    }

    fn run(rule: &dyn Rule, message: &str, value: Option<RuleValue>) -> Verdict {
        rule.check(&parse(message), Applicability::Always, value.as_ref())
            .unwrap()
    }

    #[test]
    fn test_builtin_plugin_lookup() {
        for name in BUILTIN_PLUGINS {
            let plugin = builtin_plugin(name).unwrap();
            assert_eq!(plugin.name(), *name);
            assert!(!plugin.rules().is_empty());
        }
        assert!(matches!(
            builtin_plugin("nope"),
            Err(ConfigError::UnknownPlugin { .. })
        ));
    }

    #[test]
    fn test_ticket_required() {
        assert!(run(&JiraTicketRequired, "feat: PROJ-123 add login", None).ok);

        let verdict = run(&JiraTicketRequired, "feat: add login", None);
        assert!(!verdict.ok);
        assert_eq!(
            verdict.message,
            "Commit message must include JIRA ticket reference (e.g., PROJ-123)"
        );
    }

    #[test]
    fn test_ticket_required_exempt_types() {
        assert!(run(&JiraTicketRequired, "docs: update API documentation", None).ok);
        assert!(run(&JiraTicketRequired, "chore: tidy", None).ok);

        let only_ci = Some(RuleValue::List(vec!["ci".to_string()]));
        assert!(!run(&JiraTicketRequired, "docs: update", only_ci.clone()).ok);
        assert!(run(&JiraTicketRequired, "ci: bump runner", only_ci).ok);
    }

    #[test]
    fn test_ticket_format() {
        assert!(run(&JiraTicketFormat, "feat: add login", None).ok);
        assert!(run(&JiraTicketFormat, "feat: PROJ-1 add login", None).ok);

        let commit = CommitRecord {
            ticket: Some("proj-1".to_string()),
            ..CommitRecord::default()
        };
        let verdict = JiraTicketFormat
            .check(&commit, Applicability::Always, None)
            .unwrap();
        assert!(!verdict.ok);
        assert_eq!(verdict.message, "JIRA ticket must match format: PROJECT-123");
    }

    #[test]
    fn test_no_profanity() {
        assert!(run(&NoProfanity, "fix: handle shell paths", None).ok);
        assert!(!run(&NoProfanity, "fix: what the HELL was this", None).ok);
        assert!(!run(&NoProfanity, "fix: x\n\ncrap, forgot a file", None).ok);
    }

    fn long_body(lines: usize) -> String {
        (0..lines)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_co_author_small_commit() {
        assert!(run(&RequireCoAuthor, "feat: PROJ-1 x\n\nshort body", None).ok);
    }

    #[test]
    fn test_co_author_large_commit() {
        let message = format!("feat: PROJ-1 x\n\n{}", long_body(25));
        let verdict = run(&RequireCoAuthor, &message, None);
        assert!(!verdict.ok);
        assert_eq!(
            verdict.message,
            "Large commits should include Co-authored-by: trailer"
        );

        let message = format!(
            "feat: PROJ-1 x\n\n{}\n\nCo-authored-by: Jane <jane@example.com>",
            long_body(25)
        );
        assert!(run(&RequireCoAuthor, &message, None).ok);
    }

    #[test]
    fn test_co_author_threshold_boundary() {
        // 19 body lines plus the joining newline make 20 segments.
        let message = format!("feat: x\n\n{}", long_body(19));
        assert!(run(&RequireCoAuthor, &message, None).ok);

        let message = format!("feat: x\n\n{}", long_body(20));
        assert!(!run(&RequireCoAuthor, &message, None).ok);
    }

    #[test]
    fn test_breaking_change_detail() {
        assert!(run(&BreakingChangeDetail, "feat: PROJ-1 no break", None).ok);

        let verdict = run(&BreakingChangeDetail, "feat!: PROJ-1 drop api", None);
        assert!(!verdict.ok);
        assert_eq!(
            verdict.message,
            "Breaking changes must include detailed explanation (>50 chars)"
        );

        let message = "feat!: PROJ-789 migrate to new database schema\n\n\
            BREAKING CHANGE: The database schema has changed significantly.\n\
            All existing data will be migrated automatically on first startup.";
        assert!(run(&BreakingChangeDetail, message, None).ok);
    }

    #[test]
    fn test_breaking_change_note_without_indicator() {
        let verdict = run(
            &BreakingChangeDetail,
            "feat: x\n\nbreaking change: too short",
            None,
        );
        assert!(!verdict.ok);
    }
}
