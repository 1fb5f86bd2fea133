// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Batch commit workflow.
//!
//! For each subdirectory the committer repeats: list changed files, pick up
//! to `batch_size` of them, stage, commit, push. The loop for a subdirectory
//! ends when the listing has nothing left to pick; any git failure ends the
//! whole run.

mod committer;
pub mod report;
mod selection;

pub use committer::{BatchCommitter, BatchOptions};
pub use report::{Progress, RunSummary, SubdirReport};
pub use selection::{select_batch, ProcessedSet};
