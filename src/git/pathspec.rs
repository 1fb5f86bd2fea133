// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Temporary pathspec files for `git add --pathspec-from-file`.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{GitError, Result};

/// A uniquely named file listing one path per line.
///
/// The file lives in the system temp directory, outside the working tree,
/// and is deleted when the value is dropped.
#[derive(Debug)]
pub struct PathspecFile {
    file: NamedTempFile,
}

impl PathspecFile {
    /// Write `paths` to a fresh temporary file.
    pub fn write(paths: &[String]) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("gitbatch-pathspec-")
            .suffix(".txt")
            .tempfile()
            .map_err(pathspec_error)?;

        for path in paths {
            writeln!(file, "{}", path).map_err(pathspec_error)?;
        }
        file.flush().map_err(pathspec_error)?;

        tracing::debug!(
            "Wrote {} paths to {}",
            paths.len(),
            file.path().display()
        );

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// The `git add` argument reading pathspecs from this file.
    pub fn add_argument(&self) -> String {
        format!("--pathspec-from-file={}", self.path().display())
    }
}

fn pathspec_error(err: std::io::Error) -> crate::error::BatchError {
    GitError::PathspecFileFailed {
        message: format!("cannot write temporary pathspec file: {}", err),
    }
    .into()
}
