// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI module for gitbatch.
//!
//! This module handles command-line argument parsing and running the batch
//! workflow.

pub mod args;
mod dispatch;

pub use args::{Cli, OutputFormat};
pub use dispatch::run;
