// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from gitbatch.toml.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// The main configuration structure for gitbatch.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GitBatchConfig {
    /// Batching and push configuration.
    pub batch: BatchConfig,

    /// UI/UX configuration.
    pub ui: UiConfig,
}

impl GitBatchConfig {
    /// Load configuration, searching upward from `start_dir`.
    pub fn load(start_dir: &std::path::Path) -> Result<Self> {
        super::loader::load_config(start_dir)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Reject values a run cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.batch.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "batch.batch_size".to_string(),
                message: "must be a positive integer".to_string(),
            }
            .into());
        }
        if self.batch.branch.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "batch.branch".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        if self.batch.remote.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "batch.remote".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Batching configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of files per commit.
    pub batch_size: usize,

    /// Remote branch every commit is pushed to.
    pub branch: String,

    /// Remote name.
    pub remote: String,

    /// How changed files are discovered.
    pub strategy: ChangeStrategy,

    /// How a batch is handed to `git add`.
    pub pathspec: PathspecMode,

    /// Remember files already batched within a subdirectory.
    pub track_processed: bool,

    /// Treat "nothing to commit" as a skipped batch instead of a failure.
    pub tolerate_empty_commit: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 25,
            branch: "master".to_string(),
            remote: "origin".to_string(),
            strategy: ChangeStrategy::default(),
            pathspec: PathspecMode::default(),
            track_processed: true,
            tolerate_empty_commit: true,
        }
    }
}

/// Query used to find changed files in a subdirectory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeStrategy {
    /// `git ls-files --others --modified --exclude-standard`
    #[default]
    LsFiles,
    /// `git status --porcelain`
    Status,
}

/// How staged paths are passed to git.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PathspecMode {
    /// Pass paths as arguments, falling back to a pathspec file when the
    /// argument list is too long.
    #[default]
    Auto,
    /// Always go through a temporary pathspec file.
    Always,
}

/// UI/UX configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,

    /// Whether to use emoji.
    pub emoji: bool,

    /// Ask before the first push.
    pub confirm: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            emoji: true,
            confirm: false,
        }
    }
}
