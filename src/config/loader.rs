// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration discovery and loading.

use crate::error::{ClintError, ConfigError, Result};
use std::path::{Path, PathBuf};

use super::schema::Config;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["clint.toml", ".clint.toml", ".config/clint.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        if let Some(path) = first_existing(&current) {
            return Some(path);
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(path) = dirs::home_dir().and_then(|home| first_existing(&home)) {
        return Some(path);
    }

    dirs::config_dir()
        .map(|dir| dir.join("clint").join("config.toml"))
        .filter(|path| path.exists())
}

fn first_existing(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<Config> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<Config> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(ClintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ClintError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| {
        ClintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HeaderField, Severity};
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_custom_config() {
        let toml = r#"
extends = []
plugins = ["jira"]
default_ignores = false
help_url = "https://example.com/commits"

[parser]
header_pattern = '^(\w+): (?:([A-Z]+-\d+) )?(.+)$'
header_correspondence = ["type", "ticket", "subject"]

[rules]
jira-ticket-required = [2, "always"]
"#;
        let config = parse_config(toml).unwrap();
        assert!(config.extends.is_empty());
        assert!(!config.default_ignores);
        assert_eq!(config.help_url.as_deref(), Some("https://example.com/commits"));
        assert_eq!(
            config.parser.header_correspondence,
            vec![HeaderField::Type, HeaderField::Ticket, HeaderField::Subject]
        );
        assert_eq!(
            config.rules.get("jira-ticket-required").unwrap().severity,
            Severity::Error
        );
    }

    #[test]
    fn test_parse_unknown_header_field() {
        let toml = r#"
[parser]
header_correspondence = ["type", "issue"]
"#;
        assert!(matches!(
            parse_config(toml),
            Err(ClintError::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_parse_bad_severity_is_config_error() {
        let result = parse_config("[rules]\ntype-enum = [5, \"always\"]\n");
        match result {
            Err(ClintError::Config(ConfigError::ParseError { message })) => {
                assert!(message.contains("severity"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_config_from(&dir.path().join("clint.toml"));
        assert!(matches!(
            result,
            Err(ClintError::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".clint.toml"), "extends = []\n").unwrap();

        let found = find_config_file_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(".clint.toml"));

        let config = load_config_from(&found).unwrap();
        assert!(config.extends.is_empty());
    }
}
