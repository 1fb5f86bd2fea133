// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Progress output and run summaries.

use console::style;
use serde::Serialize;

use crate::cli::args::OutputFormat;

/// What happened in one subdirectory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubdirReport {
    /// Subdirectory name.
    pub name: String,
    /// Size of each committed (or, in a dry run, selected) batch.
    pub batches: Vec<usize>,
    /// Total files across `batches`.
    pub files_processed: usize,
    /// Batches skipped because git had nothing to commit.
    pub empty_commits: usize,
}

impl SubdirReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn record_batch(&mut self, size: usize) {
        self.batches.push(size);
        self.files_processed += size;
    }
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub folder: String,
    pub remote: String,
    pub branch: String,
    pub dry_run: bool,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub subdirectories: Vec<SubdirReport>,
}

impl RunSummary {
    pub fn new(folder: impl Into<String>, remote: &str, branch: &str, dry_run: bool) -> Self {
        Self {
            folder: folder.into(),
            remote: remote.to_string(),
            branch: branch.to_string(),
            dry_run,
            started_at: chrono::Local::now().to_rfc3339(),
            finished_at: None,
            subdirectories: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(chrono::Local::now().to_rfc3339());
    }

    /// Number of commits pushed (or planned, in a dry run).
    pub fn total_batches(&self) -> usize {
        self.subdirectories.iter().map(|s| s.batches.len()).sum()
    }

    pub fn total_files(&self) -> usize {
        self.subdirectories.iter().map(|s| s.files_processed).sum()
    }

    /// Print the summary to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => self.print_text(),
        }
    }

    fn print_text(&self) {
        let verb = if self.dry_run { "would push" } else { "pushed" };
        println!(
            "{} {} files in {} commits to {}/{}",
            style("Summary:").bold(),
            self.total_files(),
            self.total_batches(),
            self.remote,
            self.branch
        );
        for subdir in &self.subdirectories {
            if subdir.batches.is_empty() {
                continue;
            }
            println!(
                "  {} {}: {} files {} in {} commits",
                style("•").dim(),
                style(&subdir.name).cyan(),
                subdir.files_processed,
                verb,
                subdir.batches.len()
            );
        }
    }

    fn print_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Per-step progress lines printed while a run is in flight.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    enabled: bool,
    emoji: bool,
}

impl Progress {
    pub fn new(enabled: bool, emoji: bool) -> Self {
        Self { enabled, emoji }
    }

    /// Progress that prints nothing.
    pub fn silent() -> Self {
        Self::new(false, false)
    }

    fn line(&self, icon: &str, text: String) {
        if !self.enabled {
            return;
        }
        if self.emoji {
            println!("{} {}", icon, text);
        } else {
            println!("{}", text);
        }
    }

    pub fn processing(&self, subdir: &str) {
        self.line(
            &style("→").cyan().to_string(),
            format!("Processing subdirectory: {}", style(subdir).bold()),
        );
    }

    pub fn no_more_files(&self, subdir: &str) {
        self.line(
            &style("·").dim().to_string(),
            format!("No more files to process in {}.", subdir),
        );
    }

    pub fn processed(&self, count: usize, subdir: &str) {
        self.line(
            &style("✓").green().bold().to_string(),
            format!("Processed {} files in {}.", count, subdir),
        );
    }

    pub fn would_process(&self, batch: &[String], subdir: &str) {
        self.line(
            &style("○").yellow().to_string(),
            format!("Would commit {} files in {}:", batch.len(), subdir),
        );
        if self.enabled {
            for path in batch {
                println!("    {}", style(path).dim());
            }
        }
    }

    pub fn nothing_to_commit(&self, count: usize, subdir: &str) {
        self.line(
            &style("⚠").yellow().bold().to_string(),
            format!(
                "Nothing to commit for {} files in {}, moving on.",
                count, subdir
            ),
        );
    }

    pub fn finished(&self) {
        self.line(
            &style("✓").green().bold().to_string(),
            "All subdirectories processed.".to_string(),
        );
    }
}
