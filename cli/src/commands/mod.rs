//! Command implementations for the glossary CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod export;
pub mod import;
pub mod ingest;
pub mod list;
pub mod pages;
pub mod show;

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use glossary_store::{ExportReport, FsStore, Repository, StoreConfig};
use serde::Serialize;

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Repository over the local filesystem.
pub fn open_repository(config: StoreConfig) -> Repository<FsStore> {
    Repository::new(FsStore::new(), config)
}

/// Counts and paths of an export, as reported to the user.
#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub root: PathBuf,
    pub written: usize,
    pub skipped: Vec<PathBuf>,
}

impl ExportSummary {
    pub fn new(root: &Path, report: &ExportReport) -> Self {
        Self {
            root: root.to_path_buf(),
            written: report.written_count(),
            skipped: report.skipped.clone(),
        }
    }

    fn print_lines(&self, label: &str) {
        println!(
            "  {} {} written to {}",
            format!("{label}:").cyan(),
            self.written,
            self.root.display()
        );
        if !self.skipped.is_empty() {
            println!(
                "  {} {} existing (use --overwrite to replace)",
                "Skipped:".yellow(),
                self.skipped.len()
            );
            for path in &self.skipped {
                println!("    {}", path.display().to_string().dimmed());
            }
        }
    }
}
