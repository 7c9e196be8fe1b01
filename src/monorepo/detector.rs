// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Package detection for monorepos.

use crate::config::ScopeConfig;
use walkdir::WalkDir;

/// Directories that never hold a package of their own.
const SKIPPED_DIRS: &[&str] = &["node_modules", "target", "vendor", "dist", "build"];

/// Detect the scopes of a monorepo.
///
/// Every immediate subdirectory of `config.packages` is a package scope,
/// sorted by name. The extra scopes follow in configured order. A missing
/// or unreadable packages directory contributes no package scopes.
pub fn detect_package_scopes(config: &ScopeConfig) -> Vec<String> {
    let mut scopes: Vec<String> = WalkDir::new(&config.packages)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !SKIPPED_DIRS.iter().any(|skip| name == *skip)
        })
        .flatten()
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();

    tracing::debug!(
        "Found {} packages in {}",
        scopes.len(),
        config.packages.display()
    );

    for extra in &config.extra {
        if !scopes.contains(extra) {
            scopes.push(extra.clone());
        }
    }

    scopes
}
