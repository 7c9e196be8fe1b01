// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in presets and default configuration values.

use crate::error::ConfigError;

use super::schema::RuleConfig;

/// Names accepted in `extends`.
pub const PRESETS: &[&str] = &["conventional"];

const CONVENTIONAL: &str = r#"
body-leading-blank = [1, "always"]
body-max-line-length = [2, "always", 100]
footer-leading-blank = [1, "always"]
footer-max-line-length = [2, "always", 100]
header-max-length = [2, "always", 100]
subject-case = [2, "never", ["sentence-case", "start-case", "pascal-case", "upper-case"]]
subject-empty = [2, "never"]
subject-full-stop = [2, "never", "."]
type-case = [2, "always", "lower-case"]
type-empty = [2, "never"]
type-enum = [2, "always", [
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
]]
"#;

/// Look up a built-in preset by name.
///
/// `@commitlint/config-conventional` is accepted as an alias of
/// `conventional` so existing configurations carry over unchanged.
pub fn preset(name: &str) -> Result<RuleConfig, ConfigError> {
    let source = match name {
        "conventional" | "config-conventional" | "@commitlint/config-conventional" => {
            CONVENTIONAL
        }
        _ => {
            return Err(ConfigError::UnknownPreset {
                name: name.to_string(),
            })
        }
    };

    toml::from_str(source).map_err(|e| ConfigError::ParseError {
        message: format!("preset '{}': {}", name, e),
    })
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# clint configuration
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Presets merged before the rules below; local rules win on conflicts.
extends = ["conventional"]

# Extra rule groups: "jira" and "guidelines".
plugins = ["jira", "guidelines"]

# Skip merge, revert, fixup/squash and version-bump commits.
default_ignores = true

help_url = "https://wiki.company.com/commit-guidelines"

# Match: type(scope): PROJ-123 subject
[parser]
header_pattern = '^(\w+)(?:\(([^)]*)\))?!?: (?:([A-Z]+-\d+) )?(.+)$'
header_correspondence = ["type", "scope", "ticket", "subject"]

# Monorepo: each directory under packages/ is an allowed scope.
# [scopes]
# packages = "packages"
# extra = ["root", "deps", "ci", "docs", "tooling", "infra", "release"]

# severity: 0/off, 1/warning, 2/error; applicability: always/never
[rules]
type-enum = [2, "always", [
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
]]
header-max-length = [2, "always", 100]
body-max-line-length = [2, "always", 100]
subject-case = [2, "always", "sentence-case"]
jira-ticket-required = [2, "always"]
jira-ticket-format = [2, "always"]
no-profanity = [2, "always"]
require-co-author = [1, "always"]
breaking-change-detail = [2, "always"]

[[ignores]]
contains = "WIP"

[[ignores]]
starts_with = "chore(deps):"

[[ignores]]
matches = '^chore\(release\): v\d+\.\d+\.\d+'
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Applicability, Config, RuleValue, Severity};

    #[test]
    fn test_conventional_preset() {
        let rules = preset("conventional").unwrap();
        assert_eq!(rules.len(), 11);

        let subject_empty = rules.get("subject-empty").unwrap();
        assert_eq!(subject_empty.severity, Severity::Error);
        assert_eq!(subject_empty.when, Applicability::Never);

        assert_eq!(
            rules.get("body-leading-blank").unwrap().severity,
            Severity::Warning
        );
        assert_eq!(
            rules.get("header-max-length").unwrap().value,
            Some(RuleValue::Number(100))
        );
    }

    #[test]
    fn test_preset_alias() {
        assert_eq!(
            preset("@commitlint/config-conventional").unwrap(),
            preset("conventional").unwrap()
        );
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(
            preset("angular"),
            Err(ConfigError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn test_example_config_parseable() {
        let example = example_config();
        let config: Config = toml::from_str(example).expect("Example config should parse");
        assert_eq!(config.plugins, vec!["jira", "guidelines"]);
        assert_eq!(config.ignores.len(), 3);
        assert_eq!(
            config.rules.get("require-co-author").unwrap().severity,
            Severity::Warning
        );

        let subject_case = config.rules.get("subject-case").unwrap();
        assert_eq!(subject_case.severity, Severity::Error);
        assert_eq!(subject_case.when, Applicability::Always);
        assert_eq!(
            subject_case.value,
            Some(RuleValue::Text("sentence-case".to_string()))
        );
    }
}
