//! Markdown page rendering for the static site.
//!
//! Pages are laid out one directory per first letter; each letter directory
//! gets an index page linking to the term pages next to it.

use unicode_segmentation::UnicodeSegmentation;

use crate::entry::Entry;
use crate::error::GlossaryResult;
use crate::naming::{self, OutputKind};

/// Capitalizes the first letter of every word.
pub fn title_case(text: &str) -> String {
    text.split_word_bounds().map(capitalize).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Entry {
    /// Renders the entry as a Markdown page.
    ///
    /// A single sense is rendered as a paragraph, several as a numbered list.
    pub fn to_page(&self) -> String {
        let mut page = format!("# {}\n\n", title_case(self.term()));

        let definition = self.definition();
        if definition.len() == 1 {
            for text in definition.texts() {
                page.push_str(&format!("{text}\n"));
            }
        } else {
            for (position, text) in definition.texts().enumerate() {
                page.push_str(&format!("{}. {text}\n", position + 1));
            }
        }

        if !self.synonym().is_empty() {
            page.push_str(&format!("\n**Synonyms:** {}\n", self.synonym().join(", ")));
        }
        if !self.see_also().is_empty() {
            page.push_str(&format!("\n**See also:** {}\n", self.see_also().join(", ")));
        }

        page
    }
}

/// Renders the index page for one letter directory.
///
/// Links are relative to the letter directory, where the term pages live.
pub fn letter_index_page(letter: char, terms: &[&str]) -> GlossaryResult<String> {
    let mut page = format!("# {}\n\n", letter.to_uppercase());
    for term in terms {
        let link = naming::entry_path(term, "", OutputKind::Page)?;
        page.push_str(&format!("- [{}]({})\n", title_case(term), link.display()));
    }
    Ok(page)
}
