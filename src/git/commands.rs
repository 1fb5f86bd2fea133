// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git command wrappers for staging, committing and pushing.

use crate::config::PathspecMode;
use crate::error::{GitError, Result};

use super::pathspec::PathspecFile;
use super::runner::{is_argument_list_too_long, GitRunner};

/// Marker git prints when a commit has nothing staged.
const NOTHING_TO_COMMIT: &str = "nothing to commit";

/// How a batch reached the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageMethod {
    /// Paths were passed as command arguments.
    Arguments,
    /// Paths were read from a temporary pathspec file.
    PathspecFile,
}

/// Result of a commit attempt that git did not reject outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// Git refused because the index matched HEAD.
    NothingToCommit,
}

/// The message every batch is committed with.
pub fn batch_commit_message(subdir: &str) -> String {
    format!("Batch commit for {}", subdir)
}

/// Stage `paths`.
///
/// In [`PathspecMode::Auto`] the paths are passed as arguments; if the OS
/// refuses the argument list, staging is retried once through a pathspec
/// file. [`PathspecMode::Always`] goes straight to the file.
pub fn stage_paths(git: &dyn GitRunner, paths: &[String], mode: PathspecMode) -> Result<StageMethod> {
    if mode == PathspecMode::Always {
        stage_from_file(git, paths)?;
        return Ok(StageMethod::PathspecFile);
    }

    let mut args = Vec::with_capacity(paths.len() + 2);
    args.push("add".to_string());
    args.push("--".to_string());
    args.extend(paths.iter().cloned());

    match git.run(&args) {
        Ok(output) if output.success => Ok(StageMethod::Arguments),
        Ok(output) => Err(GitError::StageFailed {
            message: output.combined(),
        }
        .into()),
        Err(e) if is_argument_list_too_long(&e) => {
            tracing::warn!(
                "Argument list too long for {} paths, switching to a pathspec file",
                paths.len()
            );
            stage_from_file(git, paths)?;
            Ok(StageMethod::PathspecFile)
        }
        Err(e) => Err(GitError::Spawn {
            command: "git add".to_string(),
            message: e.to_string(),
        }
        .into()),
    }
}

/// Stage through a temporary pathspec file, which is removed on return.
fn stage_from_file(git: &dyn GitRunner, paths: &[String]) -> Result<()> {
    let file = PathspecFile::write(paths)?;
    let args = vec!["add".to_string(), file.add_argument()];

    let output = git.run(&args).map_err(|e| GitError::PathspecFileFailed {
        message: e.to_string(),
    })?;

    if !output.success {
        return Err(GitError::PathspecFileFailed {
            message: output.combined(),
        }
        .into());
    }

    Ok(())
}

/// Commit the index with `message`.
///
/// A refusal because nothing is staged comes back as
/// [`CommitOutcome::NothingToCommit`]; any other failure is an error.
pub fn commit(git: &dyn GitRunner, message: &str) -> Result<CommitOutcome> {
    let args = vec!["commit".to_string(), "-m".to_string(), message.to_string()];

    let output = git.run(&args).map_err(|e| GitError::Spawn {
        command: "git commit".to_string(),
        message: e.to_string(),
    })?;

    if output.success {
        return Ok(CommitOutcome::Committed);
    }

    if output.stdout_text().contains(NOTHING_TO_COMMIT) || output.stderr.contains(NOTHING_TO_COMMIT)
    {
        return Ok(CommitOutcome::NothingToCommit);
    }

    Err(GitError::CommitFailed {
        message: output.combined(),
    }
    .into())
}

/// Push the current local branch to `remote`/`branch`.
pub fn push(git: &dyn GitRunner, remote: &str, branch: &str) -> Result<()> {
    let args = vec![
        "push".to_string(),
        remote.to_string(),
        format!("HEAD:refs/heads/{}", branch),
    ];

    let failed = |message: String| GitError::PushFailed {
        remote: remote.to_string(),
        branch: branch.to_string(),
        message,
    };

    let output = git.run(&args).map_err(|e| failed(e.to_string()))?;
    if !output.success {
        return Err(failed(output.combined()).into());
    }

    Ok(())
}
