// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Evaluation results and their rendering.

use crate::cli::args::OutputFormat;
use crate::config::Severity;
use console::style;
use serde::Serialize;

/// The outcome of one enabled rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    /// Rule name.
    pub name: String,
    /// Effective severity; `error` for crashed rules.
    pub severity: Severity,
    /// Whether the rule passed.
    pub ok: bool,
    /// Failure description; empty when the rule passed.
    pub message: String,
}

impl RuleOutcome {
    /// Failed with error severity.
    pub fn is_error(&self) -> bool {
        !self.ok && self.severity == Severity::Error
    }

    /// Failed with warning severity.
    pub fn is_warning(&self) -> bool {
        !self.ok && self.severity == Severity::Warning
    }

    /// Format the outcome for terminal output.
    pub fn format(&self) -> String {
        let prefix = if self.is_error() {
            style("✖").red().bold()
        } else {
            style("⚠").yellow().bold()
        };
        format!(
            "{}   {} {}",
            prefix,
            self.message,
            style(format!("[{}]", self.name)).dim()
        )
    }
}

/// Overall decision for one commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Accept,
    AcceptWithWarnings,
    Reject,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Accept => "accept",
            Status::AcceptWithWarnings => "accept-with-warnings",
            Status::Reject => "reject",
        }
    }
}

/// Per-rule outcomes for one commit, in configured order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationReport {
    /// The header of the linted message.
    pub input: String,
    /// Commit SHA when linting an existing commit.
    pub commit_sha: Option<String>,
    /// One outcome per enabled rule.
    pub outcomes: Vec<RuleOutcome>,
}

impl EvaluationReport {
    /// Create an empty report.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            commit_sha: None,
            outcomes: Vec::new(),
        }
    }

    /// Derive the overall status from the outcomes.
    pub fn status(&self) -> Status {
        if self.outcomes.iter().any(RuleOutcome::is_error) {
            Status::Reject
        } else if self.outcomes.iter().any(RuleOutcome::is_warning) {
            Status::AcceptWithWarnings
        } else {
            Status::Accept
        }
    }

    /// Failed error-severity outcomes.
    pub fn errors(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| o.is_error())
    }

    /// Failed warning-severity outcomes.
    pub fn warnings(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| o.is_warning())
    }

    /// The outcome of a named rule.
    pub fn outcome(&self, name: &str) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        format!(
            "found {} problems, {} warnings",
            self.errors().count(),
            self.warnings().count()
        )
    }

    /// Format the report for terminal output.
    pub fn format_text(&self, help_url: Option<&str>) -> String {
        let mut lines = Vec::new();

        let input = match self.commit_sha {
            Some(ref sha) => {
                let short: String = sha.chars().take(7).collect();
                format!("{} {}", style(short).cyan(), self.input)
            }
            None => self.input.clone(),
        };
        lines.push(format!("{}   input: {}", style("⧗").dim(), input));

        for outcome in self.errors().chain(self.warnings()) {
            lines.push(outcome.format());
        }

        lines.push(String::new());
        let status = self.status();
        let marker = match status {
            Status::Accept => style("✔").green().bold(),
            Status::AcceptWithWarnings => style("⚠").yellow().bold(),
            Status::Reject => style("✖").red().bold(),
        };
        lines.push(format!("{}   {}", marker, self.summary()));

        if let (Some(url), true) = (help_url, status != Status::Accept) {
            lines.push(format!("{}   Get help: {}", style("ⓘ").cyan(), url));
        }

        lines.join("\n")
    }

    /// Render the report as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": self.status(),
            "commit": self.commit_sha,
            "input": self.input,
            "results": self.outcomes,
        })
    }
}

/// What evaluating one commit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// An ignore predicate matched; no rule ran.
    Skipped { predicate: String },
    /// Rules ran.
    Report(EvaluationReport),
}

impl Evaluation {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Evaluation::Skipped { .. })
    }

    /// The report, if rules ran.
    pub fn report(&self) -> Option<&EvaluationReport> {
        match self {
            Evaluation::Report(report) => Some(report),
            Evaluation::Skipped { .. } => None,
        }
    }

    /// The status, if rules ran.
    pub fn status(&self) -> Option<Status> {
        self.report().map(EvaluationReport::status)
    }

    /// Attach the SHA of the linted commit.
    pub fn with_commit_sha(self, sha: impl Into<String>) -> Self {
        match self {
            Evaluation::Report(mut report) => {
                report.commit_sha = Some(sha.into());
                Evaluation::Report(report)
            }
            skipped => skipped,
        }
    }

    /// Render as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Evaluation::Report(report) => report.to_json(),
            Evaluation::Skipped { predicate } => serde_json::json!({
                "status": "skipped",
                "predicate": predicate,
            }),
        }
    }

    /// Render in the requested format.
    pub fn render(&self, format: Option<OutputFormat>, help_url: Option<&str>) -> String {
        match format {
            Some(OutputFormat::Json) => {
                serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
            }
            _ => match self {
                Evaluation::Report(report) => report.format_text(help_url),
                Evaluation::Skipped { predicate } => {
                    format!("{}   skipped ({})", style("○").dim(), predicate)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, severity: Severity, ok: bool) -> RuleOutcome {
        RuleOutcome {
            name: name.to_string(),
            severity,
            ok,
            message: if ok { String::new() } else { format!("{} failed", name) },
        }
    }

    #[test]
    fn test_empty_report_accepts() {
        let report = EvaluationReport::new("feat: test");
        assert_eq!(report.status(), Status::Accept);
        assert_eq!(report.summary(), "found 0 problems, 0 warnings");
    }

    #[test]
    fn test_status_derivation() {
        let mut report = EvaluationReport::new("feat: test");
        report.outcomes.push(outcome("a", Severity::Error, true));
        report.outcomes.push(outcome("b", Severity::Warning, false));
        assert_eq!(report.status(), Status::AcceptWithWarnings);

        report.outcomes.push(outcome("c", Severity::Error, false));
        assert_eq!(report.status(), Status::Reject);
        assert_eq!(report.summary(), "found 1 problems, 1 warnings");
    }

    #[test]
    fn test_format_text() {
        let mut report = EvaluationReport::new("feat: add login");
        report.outcomes.push(outcome("jira-ticket-required", Severity::Error, false));

        let text = report.format_text(Some("https://example.com/help"));
        assert!(text.contains("input: feat: add login"));
        assert!(text.contains("jira-ticket-required failed"));
        assert!(text.contains("[jira-ticket-required]"));
        assert!(text.contains("found 1 problems, 0 warnings"));
        assert!(text.contains("Get help: https://example.com/help"));
    }

    #[test]
    fn test_format_text_short_sha() {
        let text = Evaluation::Report(EvaluationReport::new("feat: x"))
            .with_commit_sha("3f9c2a1b7d")
            .render(None, None);
        assert!(text.contains("3f9c2a1"));
        assert!(!text.contains("3f9c2a1b"));

        // Not a hex id; truncation still lands on a char boundary.
        let text = Evaluation::Report(EvaluationReport::new("feat: x"))
            .with_commit_sha("abcdefé")
            .render(None, None);
        assert!(text.contains("abcdefé"));

        let text = Evaluation::Report(EvaluationReport::new("feat: x"))
            .with_commit_sha("ééééééééé")
            .render(None, None);
        assert!(text.contains("ééééééé"));
        assert!(!text.contains("éééééééé"));
    }

    #[test]
    fn test_help_url_hidden_when_accepted() {
        let mut report = EvaluationReport::new("feat: ok");
        report.outcomes.push(outcome("type-enum", Severity::Error, true));
        let text = report.format_text(Some("https://example.com/help"));
        assert!(!text.contains("Get help"));
    }

    #[test]
    fn test_json_render() {
        let mut report = EvaluationReport::new("feat: x");
        report.outcomes.push(outcome("type-enum", Severity::Warning, false));
        let evaluation = Evaluation::Report(report).with_commit_sha("abc1234def");

        let rendered = evaluation.render(Some(OutputFormat::Json), None);
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["status"], "accept-with-warnings");
        assert_eq!(json["commit"], "abc1234def");
        assert_eq!(json["results"][0]["severity"], "warning");
        assert_eq!(json["results"][0]["ok"], false);
    }

    #[test]
    fn test_skipped_render() {
        let evaluation = Evaluation::Skipped {
            predicate: "merge-commit".to_string(),
        };
        assert!(evaluation.is_skipped());
        assert!(evaluation.status().is_none());
        assert!(evaluation.render(None, None).contains("skipped (merge-commit)"));

        let json: serde_json::Value =
            serde_json::from_str(&evaluation.render(Some(OutputFormat::Json), None)).unwrap();
        assert_eq!(json["status"], "skipped");
    }
}
