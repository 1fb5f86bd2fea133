// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Discovery of changed files inside a subdirectory.
//!
//! Two interchangeable queries are supported:
//!
//! - [`LsFilesLister`] asks `git ls-files` for untracked and modified files.
//! - [`StatusLister`] parses `git status --porcelain` entries and keeps the
//!   status codes listed in [`CANDIDATE_CODES`].
//!
//! Both use NUL-terminated output so paths never need unquoting, and both
//! return paths relative to the working folder in the order git reports them.
//! Paths that are not valid UTF-8 cannot be handed back to git as arguments
//! and are skipped with a warning.

use std::collections::HashSet;

use crate::config::ChangeStrategy;
use crate::error::{GitError, Result};

use super::runner::GitRunner;

/// Trimmed porcelain status codes that count as a change to commit.
pub const CANDIDATE_CODES: &[&str] = &["??", "M", "A", "D", "R", "C", "U", "AM", "MM"];

/// A path reported by a change query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Path relative to the working folder.
    pub path: String,
    /// False when the change is already complete in the index (e.g. after
    /// `git rm`); such paths are committed but not passed to `git add`.
    pub needs_staging: bool,
}

impl ChangedFile {
    /// A worktree change that `git add` has to pick up.
    pub fn unstaged(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            needs_staging: true,
        }
    }

    /// A change that only exists in the index.
    pub fn index_only(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            needs_staging: false,
        }
    }
}

/// A query for the files in a subdirectory that still need committing.
pub trait ChangeLister {
    /// List changed paths under `subdir`, relative to the working folder.
    fn list_changes(&self, git: &dyn GitRunner, subdir: &str) -> Result<Vec<ChangedFile>>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Build the lister for a configured strategy.
///
/// `prefix` is the working folder's path inside the repository, as returned
/// by [`super::WorkingTree::prefix`].
pub fn lister_for(strategy: ChangeStrategy, prefix: &str) -> Box<dyn ChangeLister> {
    match strategy {
        ChangeStrategy::LsFiles => Box::new(LsFilesLister),
        ChangeStrategy::Status => Box::new(StatusLister::new(prefix)),
    }
}

/// `git ls-files --others --modified --exclude-standard`
#[derive(Debug, Clone, Copy, Default)]
pub struct LsFilesLister;

impl ChangeLister for LsFilesLister {
    fn list_changes(&self, git: &dyn GitRunner, subdir: &str) -> Result<Vec<ChangedFile>> {
        let args = [
            "ls-files",
            "-z",
            "--others",
            "--modified",
            "--exclude-standard",
            "--",
            subdir,
        ];
        let stdout = query(git, &args, subdir)?;
        Ok(parse_nul_list(&stdout))
    }

    fn name(&self) -> &'static str {
        "ls-files"
    }
}

/// `git status --porcelain`
#[derive(Debug, Clone, Default)]
pub struct StatusLister {
    prefix: String,
}

impl StatusLister {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ChangeLister for StatusLister {
    fn list_changes(&self, git: &dyn GitRunner, subdir: &str) -> Result<Vec<ChangedFile>> {
        let args = [
            "status",
            "--porcelain",
            "-z",
            "--untracked-files=all",
            "--",
            subdir,
        ];
        let stdout = query(git, &args, subdir)?;
        Ok(parse_porcelain(&stdout, &self.prefix))
    }

    fn name(&self) -> &'static str {
        "status"
    }
}

fn query(git: &dyn GitRunner, args: &[&str], subdir: &str) -> Result<Vec<u8>> {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();

    let output = git.run(&args).map_err(|e| GitError::QueryFailed {
        subdir: subdir.to_string(),
        message: e.to_string(),
    })?;

    if !output.success {
        return Err(GitError::QueryFailed {
            subdir: subdir.to_string(),
            message: output.combined(),
        }
        .into());
    }

    Ok(output.stdout)
}

/// Non-empty NUL-terminated entries.
fn nul_entries(stdout: &[u8]) -> impl Iterator<Item = &[u8]> {
    stdout.split(|b| *b == 0).filter(|e| !e.is_empty())
}

fn decode_path(raw: &[u8]) -> Option<&str> {
    match std::str::from_utf8(raw) {
        Ok(path) => Some(path),
        Err(_) => {
            tracing::warn!(
                "Skipping path that is not valid UTF-8: {}",
                String::from_utf8_lossy(raw)
            );
            None
        }
    }
}

/// Split NUL-terminated paths, dropping duplicates.
pub fn parse_nul_list(stdout: &[u8]) -> Vec<ChangedFile> {
    let mut seen = HashSet::new();
    nul_entries(stdout)
        .filter_map(decode_path)
        .filter(|p| seen.insert(*p))
        .map(ChangedFile::unstaged)
        .collect()
}

/// Whether a porcelain status code marks a file to commit.
pub fn is_candidate_code(code: &str) -> bool {
    CANDIDATE_CODES.contains(&code.trim())
}

/// Parse `git status --porcelain -z` output.
///
/// Each entry is `XY <path>`. Renames and copies are followed by their
/// original path as a separate entry, which is skipped. Paths come back
/// relative to the repository root; `prefix` is stripped from them. An
/// entry whose worktree column `Y` is blank is already fully staged.
pub fn parse_porcelain(stdout: &[u8], prefix: &str) -> Vec<ChangedFile> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();
    let mut entries = nul_entries(stdout);

    while let Some(entry) = entries.next() {
        let (Some(code), Some(raw_path)) = (entry.get(..2), entry.get(3..)) else {
            tracing::debug!(
                "Skipping malformed status entry: {:?}",
                String::from_utf8_lossy(entry)
            );
            continue;
        };

        if code.contains(&b'R') || code.contains(&b'C') {
            entries.next();
        }

        let Ok(code) = std::str::from_utf8(code) else {
            continue;
        };
        if !is_candidate_code(code) || raw_path.is_empty() {
            continue;
        }
        let Some(path) = decode_path(raw_path) else {
            continue;
        };

        let path = path.strip_prefix(prefix).unwrap_or(path);
        if seen.insert(path.to_string()) {
            files.push(ChangedFile {
                path: path.to_string(),
                needs_staging: !code.ends_with(' '),
            });
        }
    }

    files
}
