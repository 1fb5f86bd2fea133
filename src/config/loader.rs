// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and command-line overrides.

use crate::error::{BatchError, ConfigError, Result};
use std::path::{Path, PathBuf};

use super::schema::{ChangeStrategy, GitBatchConfig, PathspecMode};

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["gitbatch.toml", ".gitbatch.toml", ".config/gitbatch.toml"];

/// Values given on the command line. `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub batch_size: Option<usize>,
    pub branch: Option<String>,
    pub remote: Option<String>,
    pub strategy: Option<ChangeStrategy>,
    pub pathspec: Option<PathspecMode>,
    pub track_processed: Option<bool>,
    pub tolerate_empty_commit: Option<bool>,
    pub confirm: Option<bool>,
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }
    }

    // XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("gitbatch").join("config.toml");
        if config_path.is_file() {
            return Some(config_path);
        }
    }

    None
}

/// Load configuration found from `start_dir`, or the defaults.
pub fn load_config(start_dir: &Path) -> Result<GitBatchConfig> {
    match find_config_file_from(start_dir) {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(GitBatchConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<GitBatchConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(BatchError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        BatchError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<GitBatchConfig> {
    toml::from_str(content).map_err(|e| {
        BatchError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// Apply command-line overrides on top of a loaded configuration.
pub fn apply_overrides(mut config: GitBatchConfig, overrides: &ConfigOverrides) -> GitBatchConfig {
    let batch = &mut config.batch;
    if let Some(size) = overrides.batch_size {
        batch.batch_size = size;
    }
    if let Some(ref branch) = overrides.branch {
        batch.branch = branch.clone();
    }
    if let Some(ref remote) = overrides.remote {
        batch.remote = remote.clone();
    }
    if let Some(strategy) = overrides.strategy {
        batch.strategy = strategy;
    }
    if let Some(pathspec) = overrides.pathspec {
        batch.pathspec = pathspec;
    }
    if let Some(track) = overrides.track_processed {
        batch.track_processed = track;
    }
    if let Some(tolerate) = overrides.tolerate_empty_commit {
        batch.tolerate_empty_commit = tolerate;
    }
    if let Some(confirm) = overrides.confirm {
        config.ui.confirm = confirm;
    }
    config
}
