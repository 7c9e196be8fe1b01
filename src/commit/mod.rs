// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit module: the parsed form of a commit message.

mod record;

pub use record::{CommitRecord, HeaderParser};
