// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit record structure and parsing.

use crate::config::{HeaderField, ParserConfig, DEFAULT_HEADER_PATTERN};
use crate::error::ConfigError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Default conventional commit header pattern.
    static ref DEFAULT_HEADER_REGEX: Regex = Regex::new(DEFAULT_HEADER_PATTERN).unwrap();

    /// A trailer line such as `Refs: #12`, `Closes #4` or `BREAKING CHANGE: ...`.
    static ref TRAILER_REGEX: Regex =
        Regex::new(r"^(BREAKING[ -]CHANGE|[A-Za-z][\w-]*)(: | #)").unwrap();

    static ref SCOPE_SEPARATOR: Regex = Regex::new(r"[,/\\]").unwrap();
}

/// A parsed commit message.
///
/// Built once per commit and never mutated. Fields the header pattern does
/// not capture are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitRecord {
    /// Commit type (feat, fix, etc.).
    pub commit_type: Option<String>,
    /// Optional scope, possibly several separated by `,` `/` or `\`.
    pub scope: Option<String>,
    /// Ticket reference captured from the header.
    pub ticket: Option<String>,
    /// Subject text.
    pub subject: Option<String>,
    /// First line of the message.
    pub header: String,
    /// Optional body.
    pub body: Option<String>,
    /// Optional footer (trailers, breaking changes).
    pub footer: Option<String>,
    /// The original message.
    pub raw: String,
}

impl CommitRecord {
    /// Parse a message with the default conventional header pattern.
    pub fn parse(raw: &str) -> Self {
        HeaderParser::default().parse(raw)
    }

    /// Individual scopes of a multi-scope value such as `api,web`.
    pub fn scopes(&self) -> Vec<&str> {
        self.scope
            .as_deref()
            .map(|scope| {
                SCOPE_SEPARATOR
                    .split(scope)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Message lines with git comment lines removed.
    pub fn lines(&self) -> Vec<&str> {
        message_lines(&self.raw)
    }

    /// Whether the line after the header is blank (or absent).
    pub fn has_blank_after_header(&self) -> bool {
        self.lines()
            .get(1)
            .map_or(true, |line| line.trim().is_empty())
    }

    /// Whether the line before the footer is blank. `true` without a footer.
    pub fn has_blank_before_footer(&self) -> bool {
        let lines = self.lines();
        match footer_start(&lines) {
            Some(index) => lines[index - 1].trim().is_empty(),
            None => true,
        }
    }
}

/// Splits messages into [`CommitRecord`]s using a configurable header pattern.
#[derive(Debug, Clone)]
pub struct HeaderParser {
    pattern: Regex,
    correspondence: Vec<HeaderField>,
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_HEADER_REGEX.clone(),
            correspondence: ParserConfig::default().header_correspondence,
        }
    }
}

impl HeaderParser {
    /// Build a parser from configuration.
    pub fn from_config(config: &ParserConfig) -> Result<Self, ConfigError> {
        let pattern =
            Regex::new(&config.header_pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: config.header_pattern.clone(),
                message: e.to_string(),
            })?;

        let groups = pattern.captures_len() - 1;
        if config.header_correspondence.len() > groups {
            return Err(ConfigError::InvalidValue {
                key: "parser.header_correspondence".to_string(),
                message: format!(
                    "{} fields listed but the header pattern has {} capture groups",
                    config.header_correspondence.len(),
                    groups
                ),
            });
        }

        Ok(Self {
            pattern,
            correspondence: config.header_correspondence.clone(),
        })
    }

    /// Parse a raw commit message. Never fails: an unmatched header leaves
    /// the header fields empty.
    pub fn parse(&self, raw: &str) -> CommitRecord {
        let lines = message_lines(raw);
        let header = lines.first().map(|l| l.trim_end()).unwrap_or("");

        let mut record = CommitRecord {
            header: header.to_string(),
            raw: raw.to_string(),
            ..CommitRecord::default()
        };

        if let Some(captures) = self.pattern.captures(header) {
            for (index, field) in self.correspondence.iter().enumerate() {
                let value = captures
                    .get(index + 1)
                    .map(|m| m.as_str().trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);
                match field {
                    HeaderField::Type => record.commit_type = value,
                    HeaderField::Scope => record.scope = value,
                    HeaderField::Ticket => record.ticket = value,
                    HeaderField::Subject => record.subject = value,
                }
            }
        }

        let rest = lines.get(1..).unwrap_or(&[]);
        let (body, footer) = match footer_start(&lines) {
            Some(index) => (&lines[1..index], &lines[index..]),
            None => (rest, &[][..]),
        };
        record.body = join_block(body);
        record.footer = join_block(footer);

        record
    }
}

fn message_lines(raw: &str) -> Vec<&str> {
    raw.lines().filter(|line| !line.starts_with('#')).collect()
}

/// Index of the first footer line, which starts a paragraph with a trailer
/// or is a breaking change note.
fn footer_start(lines: &[&str]) -> Option<usize> {
    (1..lines.len()).find(|&index| {
        let line = lines[index];
        let breaking = line.starts_with("BREAKING CHANGE") || line.starts_with("BREAKING-CHANGE");
        TRAILER_REGEX.is_match(line) && (breaking || lines[index - 1].trim().is_empty())
    })
}

fn join_block(lines: &[&str]) -> Option<String> {
    let text = lines.join("\n");
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jira_parser() -> HeaderParser {
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
    }

    #[test]
    fn test_parse_header() {
        let record = CommitRecord::parse("feat(core): add new feature");
        assert_eq!(record.commit_type.as_deref(), Some("feat"));
        assert_eq!(record.scope.as_deref(), Some("core"));
        assert_eq!(record.subject.as_deref(), Some("add new feature"));
        assert_eq!(record.header, "feat(core): add new feature");
        assert!(record.body.is_none());
        assert!(record.footer.is_none());
    }

    #[test]
    fn test_parse_breaking_header() {
        let record = CommitRecord::parse("feat!: drop node 14");
        assert_eq!(record.commit_type.as_deref(), Some("feat"));
        assert_eq!(record.subject.as_deref(), Some("drop node 14"));
    }

    #[test]
    fn test_parse_unmatched_header() {
        let record = CommitRecord::parse("not a conventional commit");
        assert!(record.commit_type.is_none());
        assert!(record.subject.is_none());
        assert_eq!(record.header, "not a conventional commit");
    }

    #[test]
    fn test_parse_body_and_footer() {
        let raw = concat!(
            "fix: fix bug\n\n",
            "This is the body\nwith two lines\n\n",
            "Refs: #123\nCo-authored-by: A <a@b.c>"
        );
        let record = CommitRecord::parse(raw);
        assert_eq!(record.body.as_deref(), Some("This is the body\nwith two lines"));
        assert_eq!(
            record.footer.as_deref(),
            Some("Refs: #123\nCo-authored-by: A <a@b.c>")
        );
        assert_eq!(record.raw, raw);
        assert!(record.has_blank_after_header());
        assert!(record.has_blank_before_footer());
    }

    #[test]
    fn test_trailer_paragraph_starts_footer() {
        let record = CommitRecord::parse("fix: x\n\nNote: opens the footer\nmore text");
        // A trailer-like line opening a paragraph starts the footer.
        assert!(record.body.is_none());
        assert_eq!(
            record.footer.as_deref(),
            Some("Note: opens the footer\nmore text")
        );

        let record = CommitRecord::parse("fix: x\n\nsome text\nNote: still body");
        assert_eq!(record.body.as_deref(), Some("some text\nNote: still body"));
        assert!(record.footer.is_none());
    }

    #[test]
    fn test_breaking_change_without_blank_line() {
        let record = CommitRecord::parse("feat!: x\n\nbody text\nBREAKING CHANGE: gone");
        assert_eq!(record.body.as_deref(), Some("body text"));
        assert_eq!(record.footer.as_deref(), Some("BREAKING CHANGE: gone"));
        assert!(!record.has_blank_before_footer());
    }

    #[test]
    fn test_missing_blank_after_header() {
        let record = CommitRecord::parse("fix: x\nbody right away");
        assert_eq!(record.body.as_deref(), Some("body right away"));
        assert!(!record.has_blank_after_header());
    }

    #[test]
    fn test_comment_lines_dropped() {
        let raw = "# Please enter the commit message\nfeat: add x\n\n# comment\nbody";
        let record = CommitRecord::parse(raw);
        assert_eq!(record.header, "feat: add x");
        assert_eq!(record.body.as_deref(), Some("body"));
    }

    #[test]
    fn test_ticket_correspondence() {
        let parser = jira_parser();
        let record = parser.parse("feat(auth): PROJ-123 add OAuth2 support");
        assert_eq!(record.commit_type.as_deref(), Some("feat"));
        assert_eq!(record.scope.as_deref(), Some("auth"));
        assert_eq!(record.ticket.as_deref(), Some("PROJ-123"));
        assert_eq!(record.subject.as_deref(), Some("add OAuth2 support"));

        let record = parser.parse("feat: add login");
        assert!(record.ticket.is_none());
        assert_eq!(record.subject.as_deref(), Some("add login"));
    }

    #[test]
    fn test_scopes() {
        let record = CommitRecord::parse("feat(api-server,web-app): notify");
        assert_eq!(record.scopes(), vec!["api-server", "web-app"]);
        assert!(CommitRecord::parse("feat: x").scopes().is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let result = HeaderParser::from_config(&ParserConfig {
            header_pattern: "^(unclosed".to_string(),
            header_correspondence: vec![HeaderField::Type],
        });
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_too_many_fields() {
        let result = HeaderParser::from_config(&ParserConfig {
            header_pattern: r"^(\w+): (.*)$".to_string(),
            header_correspondence: vec![
                HeaderField::Type,
                HeaderField::Scope,
                HeaderField::Subject,
            ],
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
