// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Monorepo support module.
//!
//! Package directories of a monorepo become the allowed commit scopes.

mod detector;
mod scope;

pub use detector::detect_package_scopes;
pub use scope::apply_package_scopes;
