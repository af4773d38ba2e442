//! Glossary entries.
//!
//! An [`Entry`] is one term with its numbered definitions, optional sources
//! and references, synonyms and related terms. Entries are only created
//! through normalization, either by [`Entry::new`] / [`EntryBuilder`] or by
//! deserializing an [`EntryRecord`], so an `Entry` value always satisfies:
//!
//! - `term` is trimmed, lowercased and non-empty
//! - `definition` holds at least one sense
//! - `source` and `reference` are `None` rather than empty

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GlossaryError, GlossaryResult};
use crate::format::DocumentFormat;
use crate::senses::{SenseInput, Senses, normalize};

/// One glossary term and everything attached to it.
///
/// Serializes to exactly six fields, in this order: `term`, `definition`,
/// `source`, `reference`, `synonym`, `see_also`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord")]
pub struct Entry {
    term: String,
    definition: Senses,
    source: Option<Senses>,
    reference: Option<Senses>,
    synonym: Vec<String>,
    see_also: Vec<String>,
}

impl Entry {
    /// Creates an entry with only a term and a definition.
    pub fn new(term: impl Into<String>, definition: impl Into<SenseInput>) -> GlossaryResult<Self> {
        Self::builder(term).definition(definition).build()
    }

    /// Creates a builder for the given term.
    #[must_use]
    pub fn builder(term: impl Into<String>) -> EntryBuilder {
        EntryBuilder::new(term)
    }

    /// Reconstructs an entry from a structured record.
    pub fn from_record(record: EntryRecord) -> GlossaryResult<Self> {
        Self::builder(record.term)
            .raw_definition(record.definition)
            .raw_source(record.source)
            .raw_reference(record.reference)
            .synonym(record.synonym.unwrap_or_default())
            .see_also(record.see_also.unwrap_or_default())
            .build()
    }

    /// The lowercase term, unique within a glossary.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Numbered definitions; never empty.
    pub fn definition(&self) -> &Senses {
        &self.definition
    }

    pub fn source(&self) -> Option<&Senses> {
        self.source.as_ref()
    }

    pub fn reference(&self) -> Option<&Senses> {
        self.reference.as_ref()
    }

    pub fn synonym(&self) -> &[String] {
        &self.synonym
    }

    pub fn see_also(&self) -> &[String] {
        &self.see_also
    }

    /// Appends a definition under the next free number and returns that number.
    pub fn add_definition(&mut self, text: impl Into<String>) -> GlossaryResult<u32> {
        let text = non_empty(text.into(), "definition")?;
        Ok(self.definition.push(text))
    }

    /// Appends a source, creating the attribute if it was absent.
    pub fn add_source(&mut self, text: impl Into<String>) -> GlossaryResult<u32> {
        let text = non_empty(text.into(), "source")?;
        Ok(self.source.get_or_insert_with(Senses::new).push(text))
    }

    /// Appends a reference, creating the attribute if it was absent.
    pub fn add_reference(&mut self, text: impl Into<String>) -> GlossaryResult<u32> {
        let text = non_empty(text.into(), "reference")?;
        Ok(self.reference.get_or_insert_with(Senses::new).push(text))
    }

    /// Renders the per-entry YAML document.
    pub fn to_yaml(&self) -> GlossaryResult<String> {
        DocumentFormat::Yaml.encode(self)
    }

    /// Parses a per-entry YAML document.
    pub fn from_yaml(text: &str) -> GlossaryResult<Self> {
        DocumentFormat::Yaml.decode(text)
    }

    /// Renders the entry as a JSON record.
    pub fn to_json(&self) -> GlossaryResult<String> {
        DocumentFormat::Json.encode(self)
    }

    pub fn from_json(text: &str) -> GlossaryResult<Self> {
        DocumentFormat::Json.decode(text)
    }
}

fn non_empty(text: String, field: &'static str) -> GlossaryResult<String> {
    if text.trim().is_empty() {
        Err(GlossaryError::EmptySense { field })
    } else {
        Ok(text)
    }
}

impl TryFrom<EntryRecord> for Entry {
    type Error = GlossaryError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

/// Human-readable text block.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "term: {}", self.term)?;
        writeln!(f, "  definition:")?;
        for (number, text) in self.definition.iter() {
            writeln!(f, "    ({number}): {text}")?;
        }
        if !self.synonym.is_empty() {
            writeln!(f, "  synonym: {}", self.synonym.join(", "))?;
        }
        if !self.see_also.is_empty() {
            writeln!(f, "  see also: {}", self.see_also.join(", "))?;
        }
        for (label, senses) in [("source", &self.source), ("reference", &self.reference)] {
            if let Some(senses) = senses {
                writeln!(f, "  {label}:")?;
                for (number, text) in senses.iter() {
                    writeln!(f, "    ({number}): {text}")?;
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Record
// ============================================================================

/// The structured record an entry is read from.
///
/// Accepts the field set that [`Entry`] serializes to. Only `term` is
/// required by the format; a missing definition is reported by
/// normalization so the error names the term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryRecord {
    pub term: String,
    #[serde(default)]
    pub definition: Option<SenseInput>,
    #[serde(default)]
    pub source: Option<SenseInput>,
    #[serde(default)]
    pub reference: Option<SenseInput>,
    #[serde(default)]
    pub synonym: Option<Vec<String>>,
    #[serde(default)]
    pub see_also: Option<Vec<String>>,
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for constructing Entry instances.
#[derive(Debug, Default)]
pub struct EntryBuilder {
    term: String,
    definition: Option<SenseInput>,
    source: Option<SenseInput>,
    reference: Option<SenseInput>,
    synonym: Vec<String>,
    see_also: Vec<String>,
}

impl EntryBuilder {
    /// Starts a builder for `term`.
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    /// Sets the definition (string, sequence or numbered mapping).
    #[must_use]
    pub fn definition(mut self, definition: impl Into<SenseInput>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// Sets the source citations.
    #[must_use]
    pub fn source(mut self, source: impl Into<SenseInput>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the references.
    #[must_use]
    pub fn reference(mut self, reference: impl Into<SenseInput>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the synonyms.
    #[must_use]
    pub fn synonym<I, S>(mut self, synonym: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonym = synonym.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the related terms.
    #[must_use]
    pub fn see_also<I, S>(mut self, see_also: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.see_also = see_also.into_iter().map(Into::into).collect();
        self
    }

    fn raw_definition(mut self, definition: Option<SenseInput>) -> Self {
        self.definition = definition;
        self
    }

    fn raw_source(mut self, source: Option<SenseInput>) -> Self {
        self.source = source;
        self
    }

    fn raw_reference(mut self, reference: Option<SenseInput>) -> Self {
        self.reference = reference;
        self
    }

    /// Normalizes every attribute and builds the Entry.
    ///
    /// # Errors
    ///
    /// Fails when the term is empty, the definition is absent or empty, or
    /// an attribute has an unsupported shape.
    pub fn build(self) -> GlossaryResult<Entry> {
        let term = self.term.trim().to_lowercase();
        if term.is_empty() {
            return Err(GlossaryError::EmptyTerm);
        }

        let definition = normalize(self.definition, "definition")?
            .ok_or_else(|| GlossaryError::MissingDefinition { term: term.clone() })?;
        let source = normalize(self.source, "source")?;
        let reference = normalize(self.reference, "reference")?;

        Ok(Entry {
            term,
            definition,
            source,
            reference,
            synonym: self.synonym,
            see_also: self.see_also,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
