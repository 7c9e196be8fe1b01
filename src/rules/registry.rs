// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Registry of rules available to the evaluator.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::error::ConfigError;

use super::builtin::BuiltinRule;
use super::plugins::{builtin_plugin, Plugin};
use super::rule::Rule;

/// Enumerable mapping from rule name to implementation.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<String, Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in rule.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for rule in BuiltinRule::all() {
            registry.register(Box::new(*rule));
        }
        registry
    }

    /// Built-in rules plus the plugins enabled in the configuration.
    pub fn for_config(config: &Config) -> Result<Self, ConfigError> {
        let mut registry = Self::with_builtins();
        for name in &config.plugins {
            let plugin = builtin_plugin(name)?;
            registry.register_plugin(plugin.as_ref());
        }
        Ok(registry)
    }

    /// Register a rule, replacing any rule with the same name.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let name = rule.name().to_string();
        if self.rules.insert(name.clone(), rule).is_some() {
            tracing::debug!("Rule '{}' replaced", name);
        }
    }

    /// Register every rule of a plugin.
    pub fn register_plugin(&mut self, plugin: &dyn Plugin) {
        tracing::debug!("Registering plugin '{}'", plugin.name());
        for rule in plugin.rules() {
            self.register(rule);
        }
    }

    /// Get a rule by name.
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.get(name).map(Box::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Iterate over all rules, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.values().map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
