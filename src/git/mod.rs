// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Reads commit messages from history for `clint lint --from/--to`.

mod repo;

pub use repo::Repository;

#[cfg(test)]
pub(crate) use repo::tests::create_test_repo;
