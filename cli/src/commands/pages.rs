//! PAGES command - Render Markdown pages from the entry documents.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use glossary_store::StoreConfig;
use serde::Serialize;

use super::{ExportSummary, HumanReadable, open_repository, output};

/// Arguments for the pages command.
#[derive(Args)]
pub struct PagesArgs {
    /// Create the pages directory if it does not exist
    #[arg(long)]
    pub create_dirs: bool,
}

/// Result of a page export.
#[derive(Debug, Serialize)]
pub struct PagesResponse {
    pub name: String,
    pub count: usize,
    pub pages: ExportSummary,
}

impl HumanReadable for PagesResponse {
    fn print_human(&self) {
        println!("{}", "Pages rendered".green().bold());
        println!();
        println!("  {} {}", "Glossary:".cyan(), self.name.bold());
        println!("  {} {}", "Terms:".cyan(), self.count);
        self.pages.print_lines("Pages");
    }
}

/// Execute the pages command.
pub fn execute(config: StoreConfig, name: &str, human: bool, args: PagesArgs) -> Result<()> {
    let mut repo = open_repository(config.with_create_dirs(args.create_dirs));

    let glossary = repo
        .import_entries(name)
        .context("failed to read entry documents")?;
    let report = repo
        .export_pages(&glossary)
        .context("failed to write pages")?;

    let response = PagesResponse {
        name: glossary.name().to_owned(),
        count: glossary.count(),
        pages: ExportSummary::new(&repo.config().pages_root, &report),
    };

    output(&response, human)
}
