// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines the structures loaded from clint.toml. Rule settings accept the
//! compact array form (`[2, "always", 100]`) as well as an explicit table
//! (`{ severity = "error", when = "always", value = 100 }`).

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Pattern used to split conventional commit headers.
pub const DEFAULT_HEADER_PATTERN: &str = r"^(\w*)(?:\(([^)]*)\))?!?: (.*)$";

/// The main configuration structure for clint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Built-in presets merged before the local rules, left to right.
    pub extends: Vec<String>,

    /// Plugin rule groups to register.
    pub plugins: Vec<String>,

    /// Whether the built-in merge/revert/version-bump ignores apply.
    pub default_ignores: bool,

    /// URL shown when a commit is rejected or has warnings.
    pub help_url: Option<String>,

    /// Header parsing configuration.
    pub parser: ParserConfig,

    /// Monorepo package scopes allowed by `scope-enum`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<ScopeConfig>,

    /// Rule settings, in document order.
    pub rules: RuleConfig,

    /// Commits matching any of these are not linted.
    pub ignores: Vec<IgnoreConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extends: vec!["conventional".to_string()],
            plugins: Vec::new(),
            default_ignores: true,
            help_url: None,
            parser: ParserConfig::default(),
            scopes: None,
            rules: RuleConfig::default(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Resolve the `extends` chain and the local rules into one rule set.
    ///
    /// Presets are merged left to right and the local `rules` last, so a
    /// local setting always wins over a preset setting of the same name.
    /// Detected monorepo package scopes are then added to `scope-enum`.
    pub fn resolve(&self) -> Result<RuleConfig, ConfigError> {
        let mut resolved = RuleConfig::default();
        for name in &self.extends {
            let preset = super::default::preset(name)?;
            resolved = RuleConfig::merge(resolved, preset);
        }
        let mut resolved = RuleConfig::merge(resolved, self.rules.clone());
        if let Some(scopes) = &self.scopes {
            crate::monorepo::apply_package_scopes(&mut resolved, scopes);
        }
        Ok(resolved)
    }
}

/// How strongly a failing rule is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Off,
    Warning,
    Error,
}

impl Severity {
    /// Get the string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    fn from_level(level: i64) -> Result<Self, String> {
        match level {
            0 => Ok(Severity::Off),
            1 => Ok(Severity::Warning),
            2 => Ok(Severity::Error),
            other => Err(format!(
                "unknown severity level {} (expected 0, 1 or 2)",
                other
            )),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "0" => Ok(Severity::Off),
            "warning" | "warn" | "1" => Ok(Severity::Warning),
            "error" | "2" => Ok(Severity::Error),
            other => Err(format!(
                "unknown severity '{}' (expected off, warning or error)",
                other
            )),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a rule's condition must hold or must not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    #[default]
    Always,
    Never,
}

impl Applicability {
    /// Apply this applicability to whether a condition holds.
    pub fn apply(&self, holds: bool) -> bool {
        match self {
            Applicability::Always => holds,
            Applicability::Never => !holds,
        }
    }

    /// Verb used in rule messages.
    pub fn verb(&self) -> &'static str {
        match self {
            Applicability::Always => "must",
            Applicability::Never => "must not",
        }
    }
}

impl std::str::FromStr for Applicability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Applicability::Always),
            "never" => Ok(Applicability::Never),
            other => Err(format!(
                "unknown applicability '{}' (expected always or never)",
                other
            )),
        }
    }
}

/// Parameter attached to a rule setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Number(usize),
    Text(String),
    List(Vec<String>),
}

impl RuleValue {
    /// Human readable kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RuleValue::Number(_) => "number",
            RuleValue::Text(_) => "text",
            RuleValue::List(_) => "list",
        }
    }

    /// The value as a list of strings; a single text becomes a one-item list.
    pub fn as_list(&self) -> Option<Vec<&str>> {
        match self {
            RuleValue::Text(text) => Some(vec![text.as_str()]),
            RuleValue::List(items) => Some(items.iter().map(String::as_str).collect()),
            RuleValue::Number(_) => None,
        }
    }
}

/// Severity, applicability and optional parameter of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRuleSetting")]
pub struct RuleSetting {
    pub severity: Severity,
    pub when: Applicability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<RuleValue>,
}

impl RuleSetting {
    /// Create a setting with `always` applicability and no value.
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            when: Applicability::Always,
            value: None,
        }
    }

    /// Set the rule parameter.
    pub fn with_value(mut self, value: RuleValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Whether the rule runs at all.
    pub fn is_enabled(&self) -> bool {
        self.severity != Severity::Off
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeverity {
    Level(i64),
    Name(String),
}

impl RawSeverity {
    fn into_severity(self) -> Result<Severity, String> {
        match self {
            RawSeverity::Level(level) => Severity::from_level(level),
            RawSeverity::Name(name) => name.parse(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRuleSetting {
    Full(RawSeverity, String, RuleValue),
    Pair(RawSeverity, String),
    Single((RawSeverity,)),
    Table {
        severity: RawSeverity,
        #[serde(default)]
        when: Option<String>,
        #[serde(default)]
        value: Option<RuleValue>,
    },
}

impl TryFrom<RawRuleSetting> for RuleSetting {
    type Error = String;

    fn try_from(raw: RawRuleSetting) -> Result<Self, Self::Error> {
        let (severity, when, value) = match raw {
            RawRuleSetting::Full(severity, when, value) => (severity, Some(when), Some(value)),
            RawRuleSetting::Pair(severity, when) => (severity, Some(when), None),
            RawRuleSetting::Single((severity,)) => (severity, None, None),
            RawRuleSetting::Table {
                severity,
                when,
                value,
            } => (severity, when, value),
        };

        Ok(Self {
            severity: severity.into_severity()?,
            when: match when {
                Some(when) => when.parse()?,
                None => Applicability::Always,
            },
            value,
        })
    }
}

/// Ordered mapping from rule name to its setting.
///
/// Order is the order rules were configured in and is the order outcomes
/// appear in a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleConfig {
    entries: Vec<(String, RuleSetting)>,
}

impl RuleConfig {
    /// Create an empty rule configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a rule setting. A replaced rule keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, setting: RuleSetting) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = setting,
            None => self.entries.push((name, setting)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, setting: RuleSetting) -> Self {
        self.insert(name, setting);
        self
    }

    /// Get the setting for a rule.
    pub fn get(&self, name: &str) -> Option<&RuleSetting> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, setting)| setting)
    }

    /// Iterate over all settings in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.entries
            .iter()
            .map(|(name, setting)| (name.as_str(), setting))
    }

    /// Iterate over settings whose severity is not `off`.
    pub fn enabled(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.iter().filter(|(_, setting)| setting.is_enabled())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge two rule configurations, last writer wins per rule name.
    ///
    /// Rules present in `base` keep their position with the overlay's
    /// setting; rules only in `overlay` are appended in overlay order.
    pub fn merge(base: RuleConfig, overlay: RuleConfig) -> RuleConfig {
        let mut merged = base;
        for (name, setting) in overlay.entries {
            merged.insert(name, setting);
        }
        merged
    }
}

impl Serialize for RuleConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, setting) in &self.entries {
            map.serialize_entry(name, setting)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RuleConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuleConfigVisitor;

        impl<'de> Visitor<'de> for RuleConfigVisitor {
            type Value = RuleConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of rule settings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RuleConfig, A::Error> {
                let mut rules = RuleConfig::new();
                while let Some((name, setting)) = access.next_entry::<String, RuleSetting>()? {
                    rules.insert(name, setting);
                }
                Ok(rules)
            }
        }

        deserializer.deserialize_map(RuleConfigVisitor)
    }
}

/// Header parsing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Regex matched against the first line of the message.
    pub header_pattern: String,

    /// Field captured by each group of `header_pattern`, in group order.
    pub header_correspondence: Vec<HeaderField>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_pattern: DEFAULT_HEADER_PATTERN.to_string(),
            header_correspondence: vec![
                HeaderField::Type,
                HeaderField::Scope,
                HeaderField::Subject,
            ],
        }
    }
}

/// Monorepo scope discovery.
///
/// `packages` is read relative to the working directory clint runs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Directory whose subdirectories are package scopes.
    pub packages: PathBuf,

    /// Scopes allowed besides the packages.
    pub extra: Vec<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            packages: PathBuf::from("packages"),
            extra: ["root", "deps", "ci", "docs", "tooling", "infra", "release"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// A header field that a capture group may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderField {
    Type,
    Scope,
    Ticket,
    Subject,
}

/// A configured ignore predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreConfig {
    /// The raw message contains the text anywhere.
    Contains(String),
    /// The raw message starts with the text.
    StartsWith(String),
    /// The raw message matches the regex.
    Matches(String),
}
