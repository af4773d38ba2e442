//! glossary-core: data model for the cryosphere glossary
//!
//! This crate provides:
//! - [`Entry`], one term with numbered definitions, sources, references,
//!   synonyms and related terms
//! - [`Glossary`], the term-keyed collection and its aggregate document
//! - attribute normalization for heterogeneous input shapes ([`senses`])
//! - the term to filename mapping ([`naming`])
//! - the tabular line parser used for ingestion ([`tabular`])
//! - Markdown page rendering ([`render`])
//!
//! # Usage
//!
//! ```
//! use glossary_core::{DocumentFormat, Entry, Glossary};
//!
//! let mut glossary = Glossary::new("Cryosphere glossary");
//! glossary.add(Entry::new("Firn", "Snow that has survived one melt season.")?)?;
//!
//! let text = glossary.to_document_string(DocumentFormat::Json)?;
//! let reloaded = Glossary::from_document_str(&text, DocumentFormat::Json)?;
//! assert_eq!(reloaded, glossary);
//! assert!(reloaded.find("firn").is_some());
//! # Ok::<(), glossary_core::GlossaryError>(())
//! ```
//!
//! No I/O happens here; reading and writing documents is the job of
//! `glossary-store`.

pub mod entry;
pub mod error;
pub mod format;
pub mod glossary;
pub mod naming;
pub mod render;
pub mod senses;
pub mod tabular;

pub use entry::{Entry, EntryBuilder, EntryRecord};
pub use error::{GlossaryError, GlossaryResult};
pub use format::DocumentFormat;
pub use glossary::{Glossary, GlossaryDocument};
pub use naming::OutputKind;
pub use senses::{SenseInput, Senses};
pub use tabular::{TabularEntry, TabularOptions};
