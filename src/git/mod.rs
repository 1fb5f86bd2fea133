// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! All repository changes go through the `git` binary via [`GitRunner`];
//! `git2` is only used to locate the repository up front.

pub mod changes;
pub mod commands;
mod pathspec;
mod repo;
pub mod runner;

pub use changes::{lister_for, ChangeLister, ChangedFile, LsFilesLister, StatusLister};
pub use commands::{batch_commit_message, commit, push, stage_paths, CommitOutcome, StageMethod};
pub use pathspec::PathspecFile;
pub use repo::WorkingTree;
pub use runner::{GitOutput, GitRunner, SystemGit};
