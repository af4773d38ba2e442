//! Command-line interface for the cryosphere glossary.
//!
//! This CLI tool provides commands for the glossary workflow:
//! - ingest: Build entry documents from a comma-delimited file
//! - pages: Render Markdown pages and letter indexes
//! - export: Write the aggregate document
//! - import: Split an aggregate document into entry documents
//! - show: Print one entry
//! - list: List terms by letter
//!
//! Configuration via environment:
//! - GLOSSARY_ROOT: Directory of the entry documents (default: glossary)
//! - GLOSSARY_PAGES_ROOT: Directory of the rendered pages (default: pages)
//! - GLOSSARY_NAME: Glossary name (default: Glossary)
//! - GLOSSARY_LOG_LEVEL: Log filter when RUST_LOG is unset (default: info)

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glossary_store::StoreConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::{
    export::ExportArgs, import::ImportArgs, ingest::IngestArgs, list::ListArgs, pages::PagesArgs,
    show::ShowArgs,
};

/// Cryosphere glossary CLI
///
/// Convert the glossary between its tabular source, per-entry YAML
/// documents, aggregate documents and Markdown pages. Prints JSON by
/// default, or formatted text with --human.
#[derive(Parser)]
#[command(name = "glossary")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Directory of the per-entry documents
    #[arg(long, env = "GLOSSARY_ROOT", default_value = "glossary", global = true)]
    root: PathBuf,

    /// Directory of the rendered pages
    #[arg(long, env = "GLOSSARY_PAGES_ROOT", default_value = "pages", global = true)]
    pages_root: PathBuf,

    /// Glossary name
    #[arg(long, env = "GLOSSARY_NAME", default_value = "Glossary", global = true)]
    name: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "GLOSSARY_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build entry documents from a comma-delimited file
    Ingest(IngestArgs),

    /// Render Markdown pages from the entry documents
    Pages(PagesArgs),

    /// Write the aggregate document from the entry documents
    Export(ExportArgs),

    /// Write entry documents from an aggregate document
    Import(ImportArgs),

    /// Print one entry
    Show(ShowArgs),

    /// List terms grouped by first letter
    List(ListArgs),
}

fn main() {
    let cli = Cli::parse();

    init_tracing(&cli.log_level);

    let config = StoreConfig::default()
        .with_glossary_root(cli.root)
        .with_pages_root(cli.pages_root);
    tracing::debug!(
        glossary_root = %config.glossary_root.display(),
        pages_root = %config.pages_root.display(),
        name = %cli.name,
        "configuration loaded"
    );

    let result = match cli.command {
        Commands::Ingest(args) => commands::ingest::execute(config, &cli.name, cli.human, args),
        Commands::Pages(args) => commands::pages::execute(config, &cli.name, cli.human, args),
        Commands::Export(args) => commands::export::execute(config, &cli.name, cli.human, args),
        Commands::Import(args) => commands::import::execute(config, cli.human, args),
        Commands::Show(args) => commands::show::execute(config, &cli.name, cli.human, args),
        Commands::List(args) => commands::list::execute(config, &cli.name, cli.human, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber.
///
/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
