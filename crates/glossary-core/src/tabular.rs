//! Tabular glossary input.
//!
//! Each line holds a term and its definition separated by the first comma.
//! The definition may be wrapped in double quotes and may carry several
//! senses marked `(1) ... (2) ...`:
//!
//! ```text
//! term,definition
//! ablation,"(1) combined processes ... (2) reduction of the water equivalent ..."
//! firn,snow that has survived one melt season
//! ```
//!
//! Every sense is trimmed and sentence-cased: its first letter is
//! capitalized and a period is appended unless it already ends a sentence.

use std::sync::LazyLock;

use regex::Regex;

use crate::entry::Entry;
use crate::error::{GlossaryError, GlossaryResult};
use crate::senses::Senses;

static SENSE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)").expect("sense marker pattern is valid"));

const DELIMITER: char = ',';

/// A parsed line, ready to become an [`Entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularEntry {
    /// Term as written in the input.
    pub term: String,
    /// Sentence-cased senses, numbered from 1.
    pub definition: Senses,
}

impl TabularEntry {
    /// Builds the entry; the term is normalized by [`Entry`].
    pub fn into_entry(self) -> GlossaryResult<Entry> {
        Entry::new(self.term, self.definition)
    }
}

/// Which leading lines of a tabular file are not entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabularOptions {
    /// Lines skipped before the header (or the first entry).
    pub skip_rows: usize,
    /// Whether the first line after the skipped rows is a header.
    pub has_header: bool,
}

impl Default for TabularOptions {
    fn default() -> Self {
        Self {
            skip_rows: 0,
            has_header: true,
        }
    }
}

/// Parses one line into a term and its numbered definition.
pub fn parse_entry_line(line: &str) -> GlossaryResult<TabularEntry> {
    let line = line.trim();
    let (term, definition) =
        line.split_once(DELIMITER)
            .ok_or_else(|| GlossaryError::MalformedLine {
                line: line.to_owned(),
            })?;

    let term = term.trim();
    if term.is_empty() {
        return Err(GlossaryError::EmptyTerm);
    }

    let definition = split_senses(&unquote(definition.trim()));
    if definition.is_empty() {
        return Err(GlossaryError::MissingDefinition {
            term: term.to_owned(),
        });
    }

    Ok(TabularEntry {
        term: term.to_owned(),
        definition,
    })
}

/// Parses every entry line of a tabular file.
///
/// Blank lines are ignored; the first malformed line aborts parsing.
pub fn parse_lines<I>(lines: I, options: TabularOptions) -> GlossaryResult<Vec<TabularEntry>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let header_rows = usize::from(options.has_header);
    lines
        .into_iter()
        .skip(options.skip_rows + header_rows)
        .filter(|line| !line.as_ref().trim().is_empty())
        .map(|line| parse_entry_line(line.as_ref()))
        .collect()
}

/// Splits a definition on `(N)` markers into sentence-cased senses.
pub fn split_senses(text: &str) -> Senses {
    SENSE_MARKER
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(sentence_case)
        .collect()
}

/// Capitalizes the first letter and makes sure the text ends a sentence.
pub fn sentence_case(fragment: &str) -> String {
    let fragment = fragment.trim();
    let mut chars = fragment.chars();
    let mut sentence: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => return String::new(),
    };
    if !sentence.ends_with(['.', '!', '?']) {
        sentence.push('.');
    }
    sentence
}

/// Removes one pair of surrounding double quotes, unescaping `""`.
fn unquote(field: &str) -> String {
    match field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => field.to_owned(),
    }
}
