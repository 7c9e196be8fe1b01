// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Ignore predicates: commits matching any of these are not linted.

use crate::config::{Config, IgnoreConfig};
use crate::error::ConfigError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MERGE_COMMIT: Regex = Regex::new(concat!(
        r"^(Merge pull request |Merge branch |Merge tag |Merge remote-tracking branch |",
        r"Merge .+ into .+|Merged .+ (in|into) .+|Merged PR .+: .+|",
        r"Automatic merge|Auto-merged .+ into .+)"
    ))
    .unwrap();
    static ref REVERT_COMMIT: Regex = Regex::new(r"^(R|r)evert .+").unwrap();
    static ref AUTOSQUASH_COMMIT: Regex = Regex::new(r"^(amend|fixup|squash)! ").unwrap();
    static ref VERSION_BUMP: Regex =
        Regex::new(r"^v?\d+\.\d+\.\d+(-[0-9A-Za-z.-]+)?(\+[0-9A-Za-z.-]+)?$").unwrap();
}

/// A test over the raw commit text.
pub trait IgnorePredicate: std::fmt::Debug + Send + Sync {
    /// Name used in logs and skipped-commit output.
    fn name(&self) -> &str;

    /// Whether the commit should be skipped.
    fn matches(&self, raw: &str) -> bool;
}

/// Skips commits containing a substring.
#[derive(Debug, Clone)]
pub struct Contains {
    name: String,
    needle: String,
}

impl Contains {
    pub fn new(needle: impl Into<String>) -> Self {
        let needle = needle.into();
        Self {
            name: format!("contains '{}'", needle),
            needle,
        }
    }
}

impl IgnorePredicate for Contains {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, raw: &str) -> bool {
        raw.contains(&self.needle)
    }
}

/// Skips commits starting with a prefix.
#[derive(Debug, Clone)]
pub struct StartsWith {
    name: String,
    prefix: String,
}

impl StartsWith {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("starts with '{}'", prefix),
            prefix,
        }
    }
}

impl IgnorePredicate for StartsWith {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, raw: &str) -> bool {
        raw.starts_with(&self.prefix)
    }
}

/// Skips commits matching a regex.
#[derive(Debug, Clone)]
pub struct Matches {
    name: String,
    regex: Regex,
}

impl Matches {
    /// Compile a pattern, failing on invalid regex syntax.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::named(format!("matches '{}'", pattern), regex))
    }

    fn named(name: impl Into<String>, regex: Regex) -> Self {
        Self {
            name: name.into(),
            regex,
        }
    }
}

impl IgnorePredicate for Matches {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, raw: &str) -> bool {
        self.regex.is_match(raw)
    }
}

/// Skips release commits whose first line is a bare semantic version.
#[derive(Debug, Clone, Copy)]
pub struct VersionBump;

impl IgnorePredicate for VersionBump {
    fn name(&self) -> &str {
        "version-bump"
    }

    fn matches(&self, raw: &str) -> bool {
        raw.lines()
            .next()
            .map_or(false, |line| VERSION_BUMP.is_match(line.trim()))
    }
}

/// The built-in ignores enabled by `default_ignores`.
pub fn default_ignores() -> Vec<Box<dyn IgnorePredicate>> {
    vec![
        Box::new(Matches::named("merge-commit", MERGE_COMMIT.clone())),
        Box::new(Matches::named("revert-commit", REVERT_COMMIT.clone())),
        Box::new(Matches::named("autosquash-commit", AUTOSQUASH_COMMIT.clone())),
        Box::new(VersionBump),
    ]
}

/// Ordered set of ignore predicates; configured predicates come first.
#[derive(Debug, Default)]
pub struct IgnoreSet {
    predicates: Vec<Box<dyn IgnorePredicate>>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the set described by the configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut set = Self::new();
        for ignore in &config.ignores {
            let predicate: Box<dyn IgnorePredicate> = match ignore {
                IgnoreConfig::Contains(needle) => Box::new(Contains::new(needle.as_str())),
                IgnoreConfig::StartsWith(prefix) => Box::new(StartsWith::new(prefix.as_str())),
                IgnoreConfig::Matches(pattern) => Box::new(Matches::new(pattern)?),
            };
            set.push(predicate);
        }
        if config.default_ignores {
            for predicate in default_ignores() {
                set.push(predicate);
            }
        }
        Ok(set)
    }

    /// Add a predicate after the existing ones.
    pub fn push(&mut self, predicate: Box<dyn IgnorePredicate>) {
        self.predicates.push(predicate);
    }

    /// The first predicate matching the raw message, if any.
    pub fn first_match(&self, raw: &str) -> Option<&dyn IgnorePredicate> {
        self.predicates
            .iter()
            .map(Box::as_ref)
            .find(|predicate| predicate.matches(raw))
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}
