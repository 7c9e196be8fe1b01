// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Folding detected package scopes into the rule set.

use crate::config::{RuleConfig, RuleSetting, RuleValue, ScopeConfig, Severity};

use super::detector::detect_package_scopes;

const SCOPE_ENUM: &str = "scope-enum";

/// Allow the detected package scopes through `scope-enum`.
///
/// A configured `scope-enum` keeps its severity, applicability and listed
/// scopes; the detected scopes are appended. Without one, the rule is added
/// at error severity. Nothing changes when no scopes are found.
pub fn apply_package_scopes(rules: &mut RuleConfig, config: &ScopeConfig) {
    let detected = detect_package_scopes(config);
    if detected.is_empty() {
        tracing::debug!("No package scopes found; leaving {} unchanged", SCOPE_ENUM);
        return;
    }

    let setting = match rules.get(SCOPE_ENUM) {
        Some(existing) => {
            let mut scopes = match &existing.value {
                Some(RuleValue::List(listed)) => listed.clone(),
                _ => Vec::new(),
            };
            for scope in detected {
                if !scopes.contains(&scope) {
                    scopes.push(scope);
                }
            }
            RuleSetting {
                value: Some(RuleValue::List(scopes)),
                ..existing.clone()
            }
        }
        None => RuleSetting::new(Severity::Error).with_value(RuleValue::List(detected)),
    };

    rules.insert(SCOPE_ENUM, setting);
}
