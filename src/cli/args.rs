// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::config::{ChangeStrategy, ConfigOverrides, PathspecMode};

/// gitbatch - commit and push a repository in bounded batches
///
/// Walks the direct subdirectories of FOLDER and, for each one, stages up to
/// --batch_size changed or untracked files, commits them and pushes the
/// commit, until nothing is left to commit in that subdirectory.
#[derive(Parser, Debug)]
#[command(name = "gitbatch")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Commit and push changes in bounded batches per subdirectory")]
pub struct Cli {
    /// Working folder whose subdirectories are processed
    #[arg(required_unless_present = "print_config")]
    pub folder: Option<PathBuf>,

    /// Maximum number of files per commit [default: 25]
    #[arg(long = "batch_size", visible_alias = "batch-size", env = "GITBATCH_BATCH_SIZE")]
    pub batch_size: Option<NonZeroUsize>,

    /// Remote branch each commit is pushed to [default: master]
    #[arg(long, env = "GITBATCH_BRANCH")]
    pub branch: Option<String>,

    /// Remote to push to [default: origin]
    #[arg(long)]
    pub remote: Option<String>,

    /// Query used to find changed files
    #[arg(long, value_enum)]
    pub strategy: Option<ChangeStrategy>,

    /// How a batch is passed to `git add`
    #[arg(long, value_enum)]
    pub pathspec: Option<PathspecMode>,

    /// Do not remember files already batched; rely on the listing shrinking
    #[arg(long)]
    pub no_track_processed: bool,

    /// Fail when git reports nothing to commit for a batch
    #[arg(long)]
    pub strict_commit: bool,

    /// Show the batches that would be committed without touching the repository
    #[arg(long)]
    pub dry_run: bool,

    /// Ask for confirmation before committing and pushing
    #[arg(long)]
    pub confirm: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Output format for the run summary
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print an example configuration file and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

impl Cli {
    /// Values from the command line that override the configuration file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            batch_size: self.batch_size.map(NonZeroUsize::get),
            branch: self.branch.clone(),
            remote: self.remote.clone(),
            strategy: self.strategy,
            pathspec: self.pathspec,
            track_processed: self.no_track_processed.then_some(false),
            tolerate_empty_commit: self.strict_commit.then_some(false),
            confirm: self.confirm.then_some(true),
        }
    }

    /// Whether the summary goes out as JSON.
    pub fn is_json(&self) -> bool {
        self.format == Some(OutputFormat::Json)
    }
}
