//! IMPORT command - Split an aggregate document into entry documents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use glossary_store::StoreConfig;
use serde::Serialize;

use super::{ExportSummary, HumanReadable, open_repository, output};

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Aggregate document (.json, .yml or .yaml)
    pub file: PathBuf,

    /// Replace per-entry documents that already exist
    #[arg(long)]
    pub overwrite: bool,
}

/// Result of an aggregate import.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub name: String,
    pub count: usize,
    pub documents: ExportSummary,
}

impl HumanReadable for ImportResponse {
    fn print_human(&self) {
        println!("{}", "Imported".green().bold());
        println!();
        println!("  {} {}", "Glossary:".cyan(), self.name.bold());
        println!("  {} {}", "Terms:".cyan(), self.count);
        self.documents.print_lines("Documents");
    }
}

/// Execute the import command.
///
/// The glossary keeps the name stored in the document.
pub fn execute(config: StoreConfig, human: bool, args: ImportArgs) -> Result<()> {
    let mut repo = open_repository(config.with_overwrite(args.overwrite));

    let glossary = repo
        .load_aggregate(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let report = repo
        .export_entries(&glossary)
        .context("failed to write entry documents")?;

    let response = ImportResponse {
        name: glossary.name().to_owned(),
        count: glossary.count(),
        documents: ExportSummary::new(&repo.config().glossary_root, &report),
    };

    output(&response, human)
}
