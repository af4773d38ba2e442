//! EXPORT command - Write the aggregate document from the entry documents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use glossary_store::StoreConfig;
use serde::Serialize;

use super::{HumanReadable, open_repository, output};

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Destination file; the extension selects JSON or YAML
    pub file: PathBuf,
}

/// Result of an aggregate export.
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub name: String,
    pub count: usize,
    pub path: PathBuf,
}

impl HumanReadable for ExportResponse {
    fn print_human(&self) {
        println!("{}", "Exported".green().bold());
        println!();
        println!("  {} {}", "Glossary:".cyan(), self.name.bold());
        println!("  {} {}", "Terms:".cyan(), self.count);
        println!("  {} {}", "File:".cyan(), self.path.display());
    }
}

/// Execute the export command.
pub fn execute(config: StoreConfig, name: &str, human: bool, args: ExportArgs) -> Result<()> {
    let mut repo = open_repository(config);

    let glossary = repo
        .import_entries(name)
        .context("failed to read entry documents")?;
    repo.save_aggregate(&glossary, &args.file)
        .with_context(|| format!("failed to write {}", args.file.display()))?;

    let response = ExportResponse {
        name: glossary.name().to_owned(),
        count: glossary.count(),
        path: args.file,
    };

    output(&response, human)
}
