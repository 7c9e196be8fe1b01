// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for clint.
//!
//! This module handles loading and parsing clint.toml, the built-in
//! presets, and merging presets with local rule settings.

pub mod default;
mod loader;
mod schema;

pub use default::preset;
pub use loader::{
    find_config_file, find_config_file_from, load_config, load_config_from, parse_config,
};
pub use schema::*;
