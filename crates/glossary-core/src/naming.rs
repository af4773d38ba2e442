//! Term to filename mapping.
//!
//! Every document written for a term is named after a sanitized form of the
//! term. Sanitizing lowercases the term, drops parentheses and apostrophes
//! and collapses runs of spaces, hyphens and slashes into one underscore:
//!
//! ```
//! use glossary_core::naming::{entry_path, OutputKind};
//!
//! let path = entry_path("zone of gas-hydrate stability", "glossary", OutputKind::Document).unwrap();
//! assert_eq!(path.to_str(), Some("glossary/zone_of_gas_hydrate_stability.yml"));
//! ```
//!
//! A stem that still contains anything other than letters, digits and
//! underscores is rejected with [`GlossaryError::PathSafety`] before any I/O
//! can happen.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{GlossaryError, GlossaryResult};

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \-/]+").expect("separator pattern is valid"));

static WORD_STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("stem pattern is valid"));

/// Characters removed outright from a term.
const STRIPPED: [char; 4] = ['(', ')', '\'', '\u{2019}'];

/// The kind of document a path is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// Comma-delimited text.
    Tabular,
    /// Structured per-entry document.
    Document,
    /// Rendered Markdown page.
    Page,
}

impl OutputKind {
    /// File extension for this kind, without the leading dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Tabular => "csv",
            Self::Document => "yml",
            Self::Page => "md",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Sanitizes a term without validating the result.
pub fn sanitize_term(term: &str) -> String {
    let lowered: String = term
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect();

    SEPARATORS.replace_all(&lowered, "_").into_owned()
}

/// Sanitizes a term and checks that the result is a safe filename stem.
pub fn file_stem(term: &str) -> GlossaryResult<String> {
    let stem = sanitize_term(term);
    if WORD_STEM.is_match(&stem) {
        Ok(stem)
    } else {
        Err(GlossaryError::PathSafety { stem })
    }
}

/// Path of the `kind` document for `term` directly under `base`.
pub fn entry_path(term: &str, base: impl AsRef<Path>, kind: OutputKind) -> GlossaryResult<PathBuf> {
    let stem = file_stem(term)?;
    Ok(base.as_ref().join(format!("{stem}.{}", kind.extension())))
}

/// First character of the sanitized term, used as the letter directory.
pub fn first_letter(term: &str) -> GlossaryResult<char> {
    let stem = file_stem(term)?;
    let first = stem.chars().next();
    first.ok_or(GlossaryError::PathSafety { stem })
}

/// Path of the `kind` document for `term` under `root/<first letter>/`.
pub fn letter_path(term: &str, root: impl AsRef<Path>, kind: OutputKind) -> GlossaryResult<PathBuf> {
    let letter = first_letter(term)?;
    entry_path(term, root.as_ref().join(letter.to_string()), kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_term() {
        let path = entry_path("ablation", "glossary", OutputKind::Document).unwrap();
        assert_eq!(path, PathBuf::from("glossary/ablation.yml"));
    }

    #[test]
    fn separators_collapse_to_underscore() {
        let path = entry_path("zone of gas-hydrate stability", "glossary", OutputKind::Document)
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("glossary/zone_of_gas_hydrate_stability.yml")
        );
        assert_eq!(sanitize_term("ice - sheet / shelf"), "ice_sheet_shelf");
    }

    #[test]
    fn parentheses_and_apostrophes_are_stripped() {
        assert_eq!(sanitize_term("Glen's flow law"), "glens_flow_law");
        assert_eq!(sanitize_term("firn (névé)"), "firn_névé");
        assert_eq!(sanitize_term("Nye\u{2019}s channel"), "nyes_channel");
    }

    #[test]
    fn extension_follows_kind() {
        assert_eq!(
            entry_path("ablation", "out", OutputKind::Page).unwrap(),
            PathBuf::from("out/ablation.md")
        );
        assert_eq!(
            entry_path("ablation", "out", OutputKind::Tabular).unwrap(),
            PathBuf::from("out/ablation.csv")
        );
    }

    #[test]
    fn letter_path_uses_first_letter_directory() {
        let path = letter_path("Zone of gas-hydrate stability", "glossary", OutputKind::Document)
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("glossary/z/zone_of_gas_hydrate_stability.yml")
        );
    }

    #[test]
    fn unsafe_stems_are_rejected() {
        for term in ["", "()", "ice.sheet", "snow, wet", "a+b", "50%"] {
            let err = entry_path(term, "glossary", OutputKind::Document).unwrap_err();
            assert!(
                matches!(err, GlossaryError::PathSafety { .. }),
                "expected path-safety error for {term:?}"
            );
        }
    }

    #[test]
    fn error_names_the_stem() {
        let err = file_stem("ice.sheet").unwrap_err();
        assert_eq!(err.to_string(), "illegal filename stem: 'ice.sheet'");
    }

    #[test]
    fn naming_is_deterministic() {
        let a = entry_path("Equilibrium-line altitude", "g", OutputKind::Document).unwrap();
        let b = entry_path("Equilibrium-line altitude", "g", OutputKind::Document).unwrap();
        assert_eq!(a, b);
    }
}
