//! LIST command - List the glossary's terms.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use glossary_store::StoreConfig;
use serde::Serialize;

use super::{HumanReadable, open_repository, output};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only list terms starting with this letter
    #[arg(short, long)]
    pub letter: Option<char>,
}

/// Terms grouped by first letter.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub name: String,
    pub count: usize,
    pub letters: BTreeMap<char, Vec<String>>,
}

impl HumanReadable for ListResponse {
    fn print_human(&self) {
        println!("{}", self.name.green().bold());
        println!("{}", "=".repeat(60));

        if self.letters.is_empty() {
            println!("  {}", "(No terms)".dimmed());
            return;
        }

        for (letter, terms) in &self.letters {
            println!();
            println!(
                "{} {}",
                letter.to_uppercase().to_string().yellow().bold(),
                format!("({})", terms.len()).dimmed()
            );
            for term in terms {
                println!("  {}", term);
            }
        }

        println!();
        println!("  {} {}", "Total:".cyan(), self.count);
    }
}

/// Execute the list command.
pub fn execute(config: StoreConfig, name: &str, human: bool, args: ListArgs) -> Result<()> {
    let repo = open_repository(config);
    let glossary = repo
        .import_entries(name)
        .context("failed to read entry documents")?;

    let wanted = args.letter.map(|c| c.to_lowercase().collect::<String>());
    let letters: BTreeMap<char, Vec<String>> = glossary
        .letter_index()
        .into_iter()
        .filter(|(letter, _)| {
            wanted
                .as_deref()
                .is_none_or(|wanted| letter.to_lowercase().eq(wanted.chars()))
        })
        .map(|(letter, terms)| (letter, terms.into_iter().map(str::to_owned).collect()))
        .collect();

    let response = ListResponse {
        name: glossary.name().to_owned(),
        count: letters.values().map(Vec::len).sum(),
        letters,
    };

    output(&response, human)
}
