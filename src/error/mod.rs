// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the gitbatch application.
//!
//! Every fatal condition of a run ends up as a [`BatchError`]; the binary
//! prints it and exits non-zero. Nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for gitbatch operations.
#[derive(Error, Debug)]
pub enum BatchError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // UI/Interactive errors
    #[error("UI error: {0}")]
    Ui(String),

    // User declined the confirmation prompt
    #[error("Operation cancelled by user")]
    Cancelled,

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl From<dialoguer::Error> for BatchError {
    fn from(err: dialoguer::Error) -> Self {
        BatchError::Ui(err.to_string())
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Cannot access working folder {path}: {message}")]
    DirectoryAccess { path: PathBuf, message: String },

    #[error("Not a git repository: {path}")]
    NotARepository { path: PathBuf },

    #[error("Repository has no working directory (bare repository)")]
    BareRepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Failed to list changed files in {subdir}: {message}")]
    QueryFailed { subdir: String, message: String },

    #[error("Failed to stage files: {message}")]
    StageFailed { message: String },

    #[error("Failed to stage files via pathspec file: {message}")]
    PathspecFileFailed { message: String },

    #[error("Failed to commit: {message}")]
    CommitFailed { message: String },

    #[error("Failed to push to {remote}/{branch}: {message}")]
    PushFailed {
        remote: String,
        branch: String,
        message: String,
    },

    #[error("Failed to run {command}: {message}")]
    Spawn { command: String, message: String },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// Result type alias for gitbatch operations.
pub type Result<T> = std::result::Result<T, BatchError>;
