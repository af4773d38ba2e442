//! glossary-store: document storage for the cryosphere glossary
//!
//! This crate provides:
//! - [`DocumentStore`] with a filesystem ([`FsStore`]) and an in-memory
//!   ([`MemoryStore`]) backend
//! - [`LineSource`] for tabular ingestion
//! - [`Repository`], which exports and imports per-entry documents, renders
//!   pages, and saves and loads aggregate documents
//!
//! # Usage
//!
//! ```
//! use std::path::Path;
//!
//! use glossary_core::{Entry, Glossary};
//! use glossary_store::{MemoryStore, Repository, StoreConfig};
//!
//! let mut glossary = Glossary::new("Cryosphere glossary");
//! glossary.add(Entry::new("firn", "Snow that has survived one melt season.")?)?;
//!
//! let mut repo = Repository::new(MemoryStore::new(), StoreConfig::default());
//! let report = repo.export_entries(&glossary)?;
//! assert_eq!(report.written[0], Path::new("glossary/f/firn.yml"));
//!
//! let reloaded = repo.import_entries("Cryosphere glossary")?;
//! assert_eq!(reloaded, glossary);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use repository::{ExportReport, Repository, load_tabular};
pub use store::{DocumentStore, FsStore, LineSource, StoreConfig};
