// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for gitbatch.
//!
//! This module handles loading configuration files and layering
//! command-line overrides on top of them.

pub mod default;
mod loader;
mod schema;

pub use default::example_config;
pub use loader::{
    apply_overrides, find_config_file_from, load_config, load_config_from, parse_config,
    ConfigOverrides,
};
pub use schema::*;
