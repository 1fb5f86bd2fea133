// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository discovery for the working folder.

use crate::error::{GitError, Result};
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};

/// The working folder resolved against the repository containing it.
#[derive(Debug, Clone)]
pub struct WorkingTree {
    folder: PathBuf,
    workdir: PathBuf,
    prefix: String,
}

impl WorkingTree {
    /// Check that `folder` is an accessible directory inside a non-bare
    /// repository.
    pub fn open(folder: &Path) -> Result<Self> {
        let folder = folder.canonicalize().map_err(|e| GitError::DirectoryAccess {
            path: folder.to_path_buf(),
            message: e.to_string(),
        })?;

        if !folder.is_dir() {
            return Err(GitError::DirectoryAccess {
                path: folder,
                message: "not a directory".to_string(),
            }
            .into());
        }

        let repo = Git2Repo::discover(&folder).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::NotARepository {
                    path: folder.clone(),
                }
            } else {
                GitError::from(e)
            }
        })?;

        let workdir = repo.workdir().ok_or(GitError::BareRepository)?;
        let workdir = workdir
            .canonicalize()
            .unwrap_or_else(|_| workdir.to_path_buf());

        let prefix = folder
            .strip_prefix(&workdir)
            .map(|rel| {
                let rel = rel.to_string_lossy().replace('\\', "/");
                if rel.is_empty() {
                    rel
                } else {
                    format!("{}/", rel)
                }
            })
            .unwrap_or_default();

        tracing::debug!(
            "Working folder {} in repository {} (prefix {:?})",
            folder.display(),
            workdir.display(),
            prefix
        );

        Ok(Self {
            folder,
            workdir,
            prefix,
        })
    }

    /// The canonical working folder.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// The repository's working directory.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Path of the working folder relative to the repository root, with a
    /// trailing slash, or empty at the root.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
