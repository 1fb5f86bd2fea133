// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Enumeration of the subdirectories a run walks through.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{GitError, Result};

/// Repository metadata directory, never batched.
const GIT_DIR: &str = ".git";

/// List the direct child directories of `folder`, sorted by name.
///
/// Symlinks to directories count as directories; dangling symlinks and
/// entries that cannot be inspected are skipped. The listing is taken once;
/// directories created later in the run are not picked up.
pub fn list_subdirectories(folder: &Path) -> Result<Vec<String>> {
    let mut subdirs = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                tracing::debug!("Skipping unreadable entry in {}: {}", folder.display(), e);
                continue;
            }
            Err(e) => {
                return Err(GitError::DirectoryAccess {
                    path: folder.to_path_buf(),
                    message: e.to_string(),
                }
                .into())
            }
        };

        // `Path::is_dir` follows links and is false for a dangling one.
        if !entry.path().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(
                "Skipping subdirectory with a non UTF-8 name: {}",
                entry.path().display()
            );
            continue;
        };
        if name == GIT_DIR {
            continue;
        }
        subdirs.push(name.to_string());
    }

    tracing::debug!("Found {} subdirectories in {}", subdirs.len(), folder.display());
    Ok(subdirs)
}
