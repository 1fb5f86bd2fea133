// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The subdirectory-by-subdirectory batch loop.

use crate::config::{BatchConfig, PathspecMode};
use crate::error::{GitError, Result};
use crate::git::{
    batch_commit_message, commit, push, stage_paths, ChangeLister, CommitOutcome, GitRunner,
};

use super::report::{Progress, RunSummary, SubdirReport};
use super::selection::{select_batch, ProcessedSet};

/// Settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub batch_size: usize,
    pub branch: String,
    pub remote: String,
    pub pathspec: PathspecMode,
    pub track_processed: bool,
    pub tolerate_empty_commit: bool,
    pub dry_run: bool,
}

impl BatchOptions {
    pub fn from_config(config: &BatchConfig, dry_run: bool) -> Self {
        Self {
            batch_size: config.batch_size,
            branch: config.branch.clone(),
            remote: config.remote.clone(),
            pathspec: config.pathspec,
            track_processed: config.track_processed,
            tolerate_empty_commit: config.tolerate_empty_commit,
            dry_run,
        }
    }

    /// A dry run never changes the listing, so it always tracks processed
    /// paths to terminate.
    fn tracks_processed(&self) -> bool {
        self.track_processed || self.dry_run
    }
}

/// Stages, commits and pushes changed files in bounded batches.
pub struct BatchCommitter<'a> {
    git: &'a dyn GitRunner,
    lister: Box<dyn ChangeLister>,
    options: BatchOptions,
    progress: Progress,
}

impl<'a> BatchCommitter<'a> {
    pub fn new(git: &'a dyn GitRunner, lister: Box<dyn ChangeLister>, options: BatchOptions) -> Self {
        Self {
            git,
            lister,
            options,
            progress: Progress::silent(),
        }
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Process every subdirectory in order, stopping at the first failure.
    pub fn run(&self, subdirs: &[String]) -> Result<RunSummary> {
        tracing::debug!(
            "Running over {} subdirectories with the {} query, batch size {}",
            subdirs.len(),
            self.lister.name(),
            self.options.batch_size
        );

        let mut summary = RunSummary::new(
            self.git.workdir().display().to_string(),
            &self.options.remote,
            &self.options.branch,
            self.options.dry_run,
        );

        for subdir in subdirs {
            let report = self.process_subdirectory(subdir)?;
            summary.subdirectories.push(report);
        }

        summary.finish();
        self.progress.finished();
        Ok(summary)
    }

    /// Commit and push `subdir` batch by batch until its listing runs dry.
    pub fn process_subdirectory(&self, subdir: &str) -> Result<SubdirReport> {
        self.progress.processing(subdir);

        let mut report = SubdirReport::new(subdir);
        let mut processed = self.options.tracks_processed().then(ProcessedSet::new);

        loop {
            let changes = self.lister.list_changes(self.git, subdir)?;
            let batch = select_batch(changes, processed.as_mut(), self.options.batch_size);

            if batch.is_empty() {
                self.progress.no_more_files(subdir);
                break;
            }

            if self.options.dry_run {
                let paths: Vec<String> = batch.iter().map(|f| f.path.clone()).collect();
                self.progress.would_process(&paths, subdir);
                report.record_batch(batch.len());
                continue;
            }

            // Index-only changes (e.g. `git rm`) are committed as they are;
            // `git add` rejects a pathspec that no longer exists.
            let to_stage: Vec<String> = batch
                .iter()
                .filter(|f| f.needs_staging)
                .map(|f| f.path.clone())
                .collect();
            if to_stage.is_empty() {
                tracing::debug!("All {} files in {} are already staged", batch.len(), subdir);
            } else {
                let method = stage_paths(self.git, &to_stage, self.options.pathspec)?;
                tracing::debug!("Staged {} files in {} via {:?}", to_stage.len(), subdir, method);
            }

            match commit(self.git, &batch_commit_message(subdir))? {
                CommitOutcome::Committed => {}
                CommitOutcome::NothingToCommit
                    if self.options.tolerate_empty_commit && processed.is_some() =>
                {
                    tracing::warn!(
                        "Nothing to commit for {} files in {}, continuing",
                        batch.len(),
                        subdir
                    );
                    self.progress.nothing_to_commit(batch.len(), subdir);
                    report.empty_commits += 1;
                    continue;
                }
                CommitOutcome::NothingToCommit => {
                    return Err(GitError::CommitFailed {
                        message: format!("nothing to commit for batch in {}", subdir),
                    }
                    .into());
                }
            }

            push(self.git, &self.options.remote, &self.options.branch)?;

            self.progress.processed(batch.len(), subdir);
            report.record_batch(batch.len());
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BatchError;
    use crate::git::runner::GitOutput;
    use crate::git::{LsFilesLister, StatusLister};
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::io;
    use std::path::{Path, PathBuf};

    /// In-memory stand-in for a working tree and its remote.
    #[derive(Default)]
    struct FakeRepo {
        changed: Vec<String>,
        staged: BTreeSet<String>,
        commits: Vec<(String, Vec<String>)>,
        pushes: Vec<String>,
        calls: Vec<String>,
        pathspec_files: Vec<PathBuf>,
        /// Paths `git add` accepts but that stay in the listing.
        sticky: BTreeSet<String>,
        /// Staged paths that are gone from the worktree, listed as `D `.
        index_only: BTreeSet<String>,
        fail_push_on: Option<usize>,
        reject_direct_add: bool,
    }

    struct FakeGit {
        repo: RefCell<FakeRepo>,
    }

    impl FakeGit {
        fn with_files(files: Vec<String>) -> Self {
            Self {
                repo: RefCell::new(FakeRepo {
                    changed: files,
                    ..Default::default()
                }),
            }
        }

        fn count(&self, command: &str) -> usize {
            self.repo
                .borrow()
                .calls
                .iter()
                .filter(|c| c.as_str() == command)
                .count()
        }
    }

    fn ok(stdout: impl Into<Vec<u8>>) -> io::Result<GitOutput> {
        Ok(GitOutput {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        })
    }

    fn fail(stdout: &str, stderr: &str) -> io::Result<GitOutput> {
        Ok(GitOutput {
            success: false,
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.to_string(),
        })
    }

    impl GitRunner for FakeGit {
        fn run(&self, args: &[String]) -> io::Result<GitOutput> {
            let mut repo = self.repo.borrow_mut();
            repo.calls.push(args[0].clone());

            match args[0].as_str() {
                "ls-files" => {
                    let subdir = format!("{}/", args.last().unwrap());
                    let listed: Vec<&str> = repo
                        .changed
                        .iter()
                        .filter(|p| p.starts_with(&subdir))
                        .map(String::as_str)
                        .collect();
                    let mut out = listed.join("\0");
                    if !out.is_empty() {
                        out.push('\0');
                    }
                    ok(out)
                }
                "status" => {
                    let subdir = format!("{}/", args.last().unwrap());
                    let mut out: String = repo
                        .index_only
                        .iter()
                        .filter(|p| p.starts_with(&subdir))
                        .map(|p| format!("D  {}\0", p))
                        .collect();
                    out.extend(
                        repo.changed
                            .iter()
                            .filter(|p| p.starts_with(&subdir))
                            .map(|p| format!("?? {}\0", p)),
                    );
                    ok(out)
                }
                "add" => {
                    let paths: Vec<String> = if let Some(file) =
                        args[1].strip_prefix("--pathspec-from-file=")
                    {
                        repo.pathspec_files.push(PathBuf::from(file));
                        std::fs::read_to_string(file)?
                            .lines()
                            .map(str::to_string)
                            .collect()
                    } else if repo.reject_direct_add {
                        return Err(io::Error::from(io::ErrorKind::ArgumentListTooLong));
                    } else {
                        args[2..].to_vec()
                    };
                    if let Some(unknown) = paths
                        .iter()
                        .find(|p| !repo.changed.contains(p) && !repo.staged.contains(*p))
                    {
                        return fail(
                            "",
                            &format!("fatal: pathspec '{}' did not match any files", unknown),
                        );
                    }
                    for path in paths {
                        if repo.sticky.contains(&path) {
                            continue;
                        }
                        repo.changed.retain(|p| p != &path);
                        repo.staged.insert(path);
                    }
                    ok(String::new())
                }
                "commit" => {
                    if repo.staged.is_empty() {
                        return fail("nothing to commit, working tree clean\n", "");
                    }
                    let files = std::mem::take(&mut repo.staged).into_iter().collect();
                    repo.index_only.clear();
                    let message = args[2].clone();
                    repo.commits.push((message, files));
                    ok(String::new())
                }
                "push" => {
                    let attempt = repo.pushes.len() + 1;
                    if repo.fail_push_on == Some(attempt) {
                        return fail("", "error: failed to push some refs");
                    }
                    let refspec = args[2].clone();
                    repo.pushes.push(refspec);
                    ok(String::new())
                }
                other => panic!("unexpected git command: {}", other),
            }
        }

        fn workdir(&self) -> &Path {
            Path::new("/work")
        }
    }

    fn files(subdir: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}/f{:03}.txt", subdir, i)).collect()
    }

    fn options(batch_size: usize, branch: &str) -> BatchOptions {
        BatchOptions {
            batch_size,
            branch: branch.to_string(),
            remote: "origin".to_string(),
            pathspec: PathspecMode::Auto,
            track_processed: true,
            tolerate_empty_commit: true,
            dry_run: false,
        }
    }

    fn committer(git: &FakeGit, options: BatchOptions) -> BatchCommitter<'_> {
        BatchCommitter::new(git, Box::new(LsFilesLister), options)
    }

    fn subdirs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_three_files_and_an_empty_subdirectory() {
        let git = FakeGit::with_files(files("a", 3));
        let summary = committer(&git, options(25, "main"))
            .run(&subdirs(&["a", "b"]))
            .unwrap();

        let repo = git.repo.borrow();
        assert_eq!(repo.commits.len(), 1);
        assert_eq!(repo.commits[0].0, "Batch commit for a");
        assert_eq!(repo.commits[0].1.len(), 3);
        assert_eq!(repo.pushes, vec!["HEAD:refs/heads/main"]);

        assert_eq!(summary.subdirectories[0].batches, vec![3]);
        assert!(summary.subdirectories[1].batches.is_empty());
    }

    #[test]
    fn test_clean_subdirectory_runs_no_git_mutations() {
        let git = FakeGit::with_files(Vec::new());
        let report = committer(&git, options(25, "main"))
            .process_subdirectory("b")
            .unwrap();

        assert!(report.batches.is_empty());
        assert_eq!(git.count("ls-files"), 1);
        assert_eq!(git.count("add"), 0);
        assert_eq!(git.count("commit"), 0);
        assert_eq!(git.count("push"), 0);
    }

    #[test]
    fn test_sixty_files_in_batches_of_twenty_five() {
        let git = FakeGit::with_files(files("c", 60));
        let report = committer(&git, options(25, "master"))
            .process_subdirectory("c")
            .unwrap();

        assert_eq!(report.batches, vec![25, 25, 10]);
        assert_eq!(report.files_processed, 60);

        let repo = git.repo.borrow();
        let sizes: Vec<usize> = repo.commits.iter().map(|(_, f)| f.len()).collect();
        assert_eq!(sizes, vec![25, 25, 10]);
        assert_eq!(repo.pushes.len(), 3);
        assert!(repo.changed.is_empty());
    }

    #[test]
    fn test_batch_count_is_ceiling_of_files_over_size() {
        for (n, size) in [(1, 1), (7, 3), (9, 3), (10, 25), (51, 25)] {
            let git = FakeGit::with_files(files("d", n));
            let report = committer(&git, options(size, "main"))
                .process_subdirectory("d")
                .unwrap();
            assert_eq!(report.batches.len(), n.div_ceil(size));
            assert_eq!(report.files_processed, n);
            assert!(report.batches.iter().all(|&b| b <= size));
        }
    }

    #[test]
    fn test_push_failure_aborts_the_run() {
        let git = FakeGit::with_files(files("c", 60));
        git.repo.borrow_mut().fail_push_on = Some(2);

        let err = committer(&git, options(25, "main"))
            .run(&subdirs(&["c", "z"]))
            .unwrap_err();
        assert!(matches!(err, BatchError::Git(GitError::PushFailed { .. })));

        let repo = git.repo.borrow();
        assert_eq!(repo.commits.len(), 2);
        assert_eq!(repo.pushes.len(), 1);
        assert_eq!(repo.changed.len(), 10);
        assert_eq!(git.count("ls-files"), 2);
    }

    #[test]
    fn test_file_reported_again_is_batched_once() {
        let git = FakeGit::with_files(files("s", 2));
        git.repo.borrow_mut().sticky.insert("s/f000.txt".to_string());

        let report = committer(&git, options(25, "main"))
            .process_subdirectory("s")
            .unwrap();

        assert_eq!(report.batches, vec![2]);
        let repo = git.repo.borrow();
        assert_eq!(repo.commits.len(), 1);
        assert_eq!(repo.commits[0].1, vec!["s/f001.txt"]);
        // Still listed, never selected again.
        assert_eq!(repo.changed, vec!["s/f000.txt"]);
    }

    #[test]
    fn test_nothing_to_commit_is_tolerated_with_processed_set() {
        let git = FakeGit::with_files(files("s", 1));
        git.repo.borrow_mut().sticky.insert("s/f000.txt".to_string());

        let report = committer(&git, options(25, "main"))
            .process_subdirectory("s")
            .unwrap();

        assert!(report.batches.is_empty());
        assert_eq!(report.empty_commits, 1);
        assert_eq!(git.count("push"), 0);
    }

    #[test]
    fn test_nothing_to_commit_is_fatal_without_processed_set() {
        let git = FakeGit::with_files(files("s", 1));
        git.repo.borrow_mut().sticky.insert("s/f000.txt".to_string());

        let mut opts = options(25, "main");
        opts.track_processed = false;
        let err = committer(&git, opts).process_subdirectory("s").unwrap_err();
        assert!(matches!(err, BatchError::Git(GitError::CommitFailed { .. })));
    }

    #[test]
    fn test_nothing_to_commit_is_fatal_when_not_tolerated() {
        let git = FakeGit::with_files(files("s", 1));
        git.repo.borrow_mut().sticky.insert("s/f000.txt".to_string());

        let mut opts = options(25, "main");
        opts.tolerate_empty_commit = false;
        assert!(committer(&git, opts).process_subdirectory("s").is_err());
    }

    #[test]
    fn test_without_processed_set_listing_drives_termination() {
        let git = FakeGit::with_files(files("c", 30));
        let mut opts = options(25, "main");
        opts.track_processed = false;

        let report = committer(&git, opts).process_subdirectory("c").unwrap();
        assert_eq!(report.batches, vec![25, 5]);
    }

    #[test]
    fn test_argument_list_too_long_falls_back_and_cleans_up() {
        let git = FakeGit::with_files(files("c", 30));
        git.repo.borrow_mut().reject_direct_add = true;

        let report = committer(&git, options(25, "main"))
            .process_subdirectory("c")
            .unwrap();
        assert_eq!(report.batches, vec![25, 5]);

        let repo = git.repo.borrow();
        assert_eq!(repo.pathspec_files.len(), 2);
        assert!(repo.pathspec_files.iter().all(|p| !p.exists()));
    }

    #[test]
    fn test_pathspec_file_removed_when_push_fails() {
        let git = FakeGit::with_files(files("c", 3));
        git.repo.borrow_mut().fail_push_on = Some(1);

        let mut opts = options(25, "main");
        opts.pathspec = PathspecMode::Always;
        assert!(committer(&git, opts).process_subdirectory("c").is_err());

        let repo = git.repo.borrow();
        assert_eq!(repo.pathspec_files.len(), 1);
        assert!(!repo.pathspec_files[0].exists());
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let git = FakeGit::with_files(files("c", 60));
        let mut opts = options(25, "main");
        opts.dry_run = true;
        opts.track_processed = false;

        let summary = committer(&git, opts).run(&subdirs(&["c"])).unwrap();
        assert!(summary.dry_run);
        assert_eq!(summary.subdirectories[0].batches, vec![25, 25, 10]);
        assert_eq!(git.count("add"), 0);
        assert_eq!(git.count("commit"), 0);
        assert_eq!(git.count("push"), 0);
        assert_eq!(git.repo.borrow().changed.len(), 60);
    }

    #[test]
    fn test_status_query_strategy() {
        let git = FakeGit::with_files(files("a", 4));
        let report = BatchCommitter::new(&git, Box::new(StatusLister::new("")), options(3, "main"))
            .process_subdirectory("a")
            .unwrap();
        assert_eq!(report.batches, vec![3, 1]);
        assert_eq!(git.count("status"), 3);
    }

    #[test]
    fn test_staged_deletion_is_committed_without_add() {
        let git = FakeGit::with_files(vec!["a/new.txt".to_string()]);
        {
            let mut repo = git.repo.borrow_mut();
            repo.staged.insert("a/old.txt".to_string());
            repo.index_only.insert("a/old.txt".to_string());
        }

        let report = BatchCommitter::new(&git, Box::new(StatusLister::new("")), options(25, "main"))
            .process_subdirectory("a")
            .unwrap();
        assert_eq!(report.batches, vec![2]);

        let repo = git.repo.borrow();
        assert_eq!(repo.commits.len(), 1);
        assert_eq!(repo.commits[0].1, vec!["a/new.txt", "a/old.txt"]);
        assert_eq!(repo.pushes.len(), 1);
    }

    #[test]
    fn test_batch_of_only_staged_deletions_skips_add() {
        let git = FakeGit::with_files(Vec::new());
        {
            let mut repo = git.repo.borrow_mut();
            repo.staged.insert("a/old.txt".to_string());
            repo.index_only.insert("a/old.txt".to_string());
        }

        let report = BatchCommitter::new(&git, Box::new(StatusLister::new("")), options(25, "main"))
            .process_subdirectory("a")
            .unwrap();
        assert_eq!(report.batches, vec![1]);
        assert_eq!(git.count("add"), 0);
        assert_eq!(git.count("commit"), 1);
    }

    #[test]
    fn test_options_from_config() {
        let config = BatchConfig::default();
        let opts = BatchOptions::from_config(&config, true);
        assert_eq!(opts.batch_size, 25);
        assert_eq!(opts.branch, "master");
        assert!(opts.dry_run);
        assert!(opts.tracks_processed());
    }
}
