//! SHOW command - Print one entry.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use glossary_core::Entry;
use glossary_store::StoreConfig;
use serde::Serialize;

use super::{HumanReadable, open_repository, output};

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Term to look up (case-insensitive)
    pub term: String,

    /// Also print the entry document exactly as it would be written
    #[arg(long)]
    pub document: bool,
}

#[derive(Debug, Serialize)]
pub struct DocumentPreview {
    pub path: PathBuf,
    pub text: String,
}

/// A single entry, optionally with its rendered document.
#[derive(Debug, Serialize)]
pub struct ShowResponse {
    pub entry: Entry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentPreview>,
}

impl HumanReadable for ShowResponse {
    fn print_human(&self) {
        print!("{}", self.entry);
        if let Some(document) = &self.document {
            println!();
            println!("{} {}", "Document:".cyan(), document.path.display());
            println!("{}", "-".repeat(60).dimmed());
            print!("{}", document.text);
        }
    }
}

/// Execute the show command.
pub fn execute(config: StoreConfig, name: &str, human: bool, args: ShowArgs) -> Result<()> {
    let repo = open_repository(config);
    let glossary = repo
        .import_entries(name)
        .context("failed to read entry documents")?;

    let key = args.term.trim().to_lowercase();
    let Some(entry) = glossary.find(&key) else {
        bail!("term not found: {}", args.term.trim());
    };

    let document = if args.document {
        let (path, text) = repo.render_entry_document(entry)?;
        Some(DocumentPreview { path, text })
    } else {
        None
    };

    let response = ShowResponse {
        entry: entry.clone(),
        document,
    };

    output(&response, human)
}
