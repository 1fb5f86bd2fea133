// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The process seam every git invocation goes through.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured result of a finished git process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Raw stdout; paths in `-z` listings need not be UTF-8.
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl GitOutput {
    /// Stdout decoded for messages.
    pub fn stdout_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Stdout and stderr joined, trimmed, for diagnostics.
    pub fn combined(&self) -> String {
        let stdout_text = self.stdout_text();
        let stdout = stdout_text.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (true, _) => stderr.to_string(),
            (false, true) => stdout.to_string(),
            (false, false) => format!("{}\n{}", stderr, stdout),
        }
    }
}

/// Runs git with a fixed working directory.
///
/// An `Err` means the process could not be started at all; a process that
/// ran and failed is reported through [`GitOutput::success`].
pub trait GitRunner {
    fn run(&self, args: &[String]) -> io::Result<GitOutput>;

    /// Directory git runs in.
    fn workdir(&self) -> &Path;
}

/// Runs the system `git` binary.
#[derive(Debug, Clone)]
pub struct SystemGit {
    workdir: PathBuf,
}

impl SystemGit {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[String]) -> io::Result<GitOutput> {
        tracing::debug!("git {} (in {})", args.join(" "), self.workdir.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        let result = GitOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success {
            tracing::debug!("git exited with {}: {}", output.status, result.combined());
        }

        Ok(result)
    }

    fn workdir(&self) -> &Path {
        &self.workdir
    }
}

/// Whether a spawn failure was caused by an oversized argument list.
pub fn is_argument_list_too_long(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::ArgumentListTooLong
}
