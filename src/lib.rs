// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! gitbatch - batch committer for large working trees
//!
//! Commits the changes under each direct subdirectory of a working folder in
//! commits of at most `batch_size` files, pushing after every commit.
//!
//! # Example
//!
//! ```no_run
//! use gitbatch::batch::{BatchCommitter, BatchOptions};
//! use gitbatch::config::GitBatchConfig;
//! use gitbatch::git::{lister_for, SystemGit, WorkingTree};
//! use gitbatch::workspace::list_subdirectories;
//!
//! let tree = WorkingTree::open(std::path::Path::new("assets")).unwrap();
//! let config = GitBatchConfig::load(tree.folder()).unwrap();
//! let git = SystemGit::new(tree.folder());
//!
//! let committer = BatchCommitter::new(
//!     &git,
//!     lister_for(config.batch.strategy, tree.prefix()),
//!     BatchOptions::from_config(&config.batch, false),
//! );
//! let subdirs = list_subdirectories(tree.folder()).unwrap();
//! let summary = committer.run(&subdirs).unwrap();
//! println!("{} commits pushed", summary.total_batches());
//! ```

// Module declarations
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod workspace;

// Re-exports for convenience
pub use config::GitBatchConfig;
pub use error::{BatchError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of gitbatch.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Placeholder vergen emits when git metadata is unavailable.
    const IDEMPOTENT: &str = "VERGEN_IDEMPOTENT_OUTPUT";

    fn known(value: Option<&'static str>) -> Option<&'static str> {
        value.filter(|v| !v.is_empty() && *v != IDEMPOTENT)
    }

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (known(GIT_SHA), known(GIT_COMMIT_DATE)) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }

}
