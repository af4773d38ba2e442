//! INGEST command - Build per-entry documents from a tabular file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use glossary_core::TabularOptions;
use glossary_store::{FsStore, StoreConfig, load_tabular};
use serde::Serialize;

use super::{ExportSummary, HumanReadable, open_repository, output};

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// Comma-delimited file, one term per line
    pub csv: PathBuf,

    /// Lines to skip before the header
    #[arg(long, default_value_t = 0)]
    pub skip_rows: usize,

    /// The file has no header row
    #[arg(long)]
    pub no_header: bool,

    /// Replace per-entry documents that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// Also write the aggregate document to this path (.json, .yml or .yaml)
    #[arg(long)]
    pub aggregate: Option<PathBuf>,
}

/// Result of an ingest.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub name: String,
    pub source: PathBuf,
    pub count: usize,
    pub documents: ExportSummary,
    pub aggregate: Option<PathBuf>,
}

impl HumanReadable for IngestResponse {
    fn print_human(&self) {
        println!("{}", "Ingested".green().bold());
        println!();
        println!("  {} {}", "Glossary:".cyan(), self.name.bold());
        println!("  {} {}", "Source:".cyan(), self.source.display());
        println!("  {} {}", "Terms:".cyan(), self.count);
        self.documents.print_lines("Documents");
        if let Some(path) = &self.aggregate {
            println!("  {} {}", "Aggregate:".cyan(), path.display());
        }
    }
}

/// Execute the ingest command.
pub fn execute(config: StoreConfig, name: &str, human: bool, args: IngestArgs) -> Result<()> {
    let options = TabularOptions {
        skip_rows: args.skip_rows,
        has_header: !args.no_header,
    };

    let glossary = load_tabular(&FsStore::new(), &args.csv, name, options)
        .with_context(|| format!("failed to ingest {}", args.csv.display()))?;

    let mut repo = open_repository(config.with_overwrite(args.overwrite));
    let report = repo
        .export_entries(&glossary)
        .context("failed to write entry documents")?;

    if let Some(path) = &args.aggregate {
        repo.save_aggregate(&glossary, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let response = IngestResponse {
        name: glossary.name().to_owned(),
        source: args.csv,
        count: glossary.count(),
        documents: ExportSummary::new(&repo.config().glossary_root, &report),
        aggregate: args.aggregate,
    };

    output(&response, human)
}
