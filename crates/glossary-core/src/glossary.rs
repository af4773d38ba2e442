//! The glossary collection and its aggregate document.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::{GlossaryError, GlossaryResult};
use crate::format::DocumentFormat;
use crate::naming;

/// A named collection of entries keyed by term.
///
/// Entries are held in term order, so iteration and every serialized form
/// are sorted lexicographically by term. `count` always equals the number of
/// entries and is written to aggregate documents explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "GlossaryDocument")]
pub struct Glossary {
    name: String,
    entries: BTreeMap<String, Entry>,
    count: usize,
}

impl Glossary {
    /// Creates an empty glossary.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
            count: 0,
        }
    }

    /// Creates a glossary from entries, failing on the first duplicate term.
    pub fn from_entries<I>(name: impl Into<String>, entries: I) -> GlossaryResult<Self>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut glossary = Self::new(name);
        for entry in entries {
            glossary.add(entry)?;
        }
        Ok(glossary)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Looks up a term.
    ///
    /// Keys are lowercase; callers lowercase the term they search for. A miss
    /// is logged and returned as `None`.
    pub fn find(&self, term: &str) -> Option<&Entry> {
        let found = self.entries.get(term);
        if found.is_none() {
            tracing::debug!(term, glossary = %self.name, "term not found");
        }
        found
    }

    /// Whether `term` is present.
    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    /// Inserts an entry.
    ///
    /// # Errors
    ///
    /// Returns [`GlossaryError::Collision`] if the term is already present;
    /// the glossary is left unchanged.
    pub fn add(&mut self, entry: Entry) -> GlossaryResult<()> {
        match self.entries.entry(entry.term().to_owned()) {
            btree_map::Entry::Occupied(occupied) => Err(GlossaryError::Collision {
                term: occupied.key().clone(),
            }),
            btree_map::Entry::Vacant(vacant) => {
                vacant.insert(entry);
                self.count += 1;
                Ok(())
            }
        }
    }

    /// All terms, in term order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries, in term order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Groups terms by the letter directory their documents live in.
    ///
    /// That is the first character of the filename stem, so `(firn)` is
    /// listed under `f`. A term with no valid stem falls back to its own
    /// first character.
    pub fn letter_index(&self) -> BTreeMap<char, Vec<&str>> {
        let mut index: BTreeMap<char, Vec<&str>> = BTreeMap::new();
        for term in self.terms() {
            let letter = naming::first_letter(term)
                .ok()
                .or_else(|| term.chars().next());
            if let Some(letter) = letter {
                index.entry(letter).or_default().push(term);
            }
        }
        index
    }

    /// Builds the aggregate document.
    pub fn to_document(&self) -> GlossaryDocument {
        GlossaryDocument {
            name: self.name.clone(),
            count: self.count,
            entries: self.entries.values().cloned().collect(),
        }
    }

    /// Rebuilds a glossary from an aggregate document.
    ///
    /// A stored count that disagrees with the entries is logged and replaced
    /// by the number of entries actually loaded.
    pub fn from_document(document: GlossaryDocument) -> GlossaryResult<Self> {
        let stored_count = document.count;
        let glossary = Self::from_entries(document.name, document.entries)?;
        if stored_count != glossary.count {
            tracing::warn!(
                glossary = %glossary.name,
                stored_count,
                actual_count = glossary.count,
                "aggregate document count does not match its entries"
            );
        }
        Ok(glossary)
    }

    /// Encodes the aggregate document.
    pub fn to_document_string(&self, format: DocumentFormat) -> GlossaryResult<String> {
        format.encode(self)
    }

    /// Decodes an aggregate document.
    pub fn from_document_str(text: &str, format: DocumentFormat) -> GlossaryResult<Self> {
        let document: GlossaryDocument = format.decode(text)?;
        Self::from_document(document)
    }
}

impl Serialize for Glossary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        DocumentView {
            name: &self.name,
            count: self.count,
            entries: self.entries.values().collect(),
        }
        .serialize(serializer)
    }
}

impl TryFrom<GlossaryDocument> for Glossary {
    type Error = GlossaryError;

    fn try_from(document: GlossaryDocument) -> Result<Self, Self::Error> {
        Self::from_document(document)
    }
}

impl<'a> IntoIterator for &'a Glossary {
    type Item = &'a Entry;
    type IntoIter = btree_map::Values<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// The aggregate document: the whole glossary in one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryDocument {
    pub name: String,
    #[serde(default)]
    pub count: usize,
    /// Entries sorted by term.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Borrowed form of [`GlossaryDocument`] used for serialization.
#[derive(Serialize)]
struct DocumentView<'a> {
    name: &'a str,
    count: usize,
    entries: Vec<&'a Entry>,
}
