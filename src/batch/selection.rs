// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Picking the next batch out of a change listing.

use std::collections::HashSet;

use crate::git::ChangedFile;

/// Paths already handed to a batch within one subdirectory's loop.
#[derive(Debug, Default, Clone)]
pub struct ProcessedSet {
    paths: HashSet<String>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn insert(&mut self, path: String) {
        self.paths.insert(path);
    }
}

/// Take up to `batch_size` candidates in listing order.
///
/// With a [`ProcessedSet`], already processed paths are skipped and the
/// selected ones are recorded before the batch is acted on, so a path is
/// never selected twice.
pub fn select_batch(
    candidates: Vec<ChangedFile>,
    processed: Option<&mut ProcessedSet>,
    batch_size: usize,
) -> Vec<ChangedFile> {
    match processed {
        None => candidates.into_iter().take(batch_size).collect(),
        Some(processed) => {
            let batch: Vec<ChangedFile> = candidates
                .into_iter()
                .filter(|f| !processed.contains(&f.path))
                .take(batch_size)
                .collect();
            for file in &batch {
                processed.insert(file.path.clone());
            }
            batch
        }
    }
}
