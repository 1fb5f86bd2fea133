// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command execution.

use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::batch::{BatchCommitter, BatchOptions, Progress};
use crate::config::{apply_overrides, example_config, GitBatchConfig};
use crate::error::{BatchError, Result};
use crate::git::{lister_for, SystemGit, WorkingTree};
use crate::workspace::list_subdirectories;

use super::args::Cli;

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    if cli.print_config {
        print!("{}", example_config());
        return Ok(());
    }

    let folder = cli.folder.clone().ok_or_else(|| BatchError::WithContext {
        context: "arguments".to_string(),
        message: "a working folder is required".to_string(),
    })?;

    let tree = WorkingTree::open(&folder)?;

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        GitBatchConfig::load_from(config_path)?
    } else {
        GitBatchConfig::load(tree.folder())?
    };
    let config = apply_overrides(config, &cli.overrides());
    config.validate()?;

    if !config.ui.color {
        console::set_colors_enabled(false);
    }
    tracing::debug!("Effective configuration: {:?}", config);

    let subdirs = list_subdirectories(tree.folder())?;

    if config.ui.confirm && !cli.dry_run {
        confirm_run(&config, subdirs.len())?;
    }

    let git = SystemGit::new(tree.folder());
    let lister = lister_for(config.batch.strategy, tree.prefix());
    let options = BatchOptions::from_config(&config.batch, cli.dry_run);
    let progress = Progress::new(!cli.is_json(), config.ui.emoji);

    let summary = BatchCommitter::new(&git, lister, options)
        .with_progress(progress)
        .run(&subdirs)?;

    summary.print(cli.format);

    Ok(())
}

/// Ask before anything is committed or pushed.
fn confirm_run(config: &GitBatchConfig, subdir_count: usize) -> Result<()> {
    if !Term::stdout().is_term() {
        return Err(BatchError::Ui(
            "confirmation requested but not running in a terminal".to_string(),
        ));
    }

    let prompt = format!(
        "Commit and push changes in {} subdirectories to {}/{}?",
        subdir_count, config.batch.remote, config.batch.branch
    );

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    if confirmed {
        Ok(())
    } else {
        Err(BatchError::Cancelled)
    }
}
