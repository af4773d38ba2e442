//! Error types for the glossary data model.

use thiserror::Error;

/// Result type alias for glossary operations.
pub type GlossaryResult<T> = Result<T, GlossaryError>;

/// Errors raised while building, combining or encoding glossary data.
#[derive(Debug, Error)]
pub enum GlossaryError {
    /// A term was empty after trimming.
    #[error("term must not be empty")]
    EmptyTerm,

    /// An entry was constructed without any definition.
    #[error("entry '{term}' has no definition")]
    MissingDefinition { term: String },

    /// An attribute arrived in a shape that cannot be normalized.
    #[error("expected string, sequence or mapping for {field}, found {found}")]
    TypeMismatch { field: &'static str, found: String },

    /// An appended sense was empty.
    #[error("cannot add an empty {field}")]
    EmptySense { field: &'static str },

    /// A tabular line had no delimiter separating term and definition.
    #[error("malformed tabular line (no delimiter): {line}")]
    MalformedLine { line: String },

    /// A term is already present in the glossary.
    #[error("term already in glossary: {term}")]
    Collision { term: String },

    /// A sanitized filename stem contains characters outside `[A-Za-z0-9_]`.
    #[error("illegal filename stem: '{stem}'")]
    PathSafety { stem: String },

    /// Two documents in one export would be written to the same file.
    #[error("'{first}' and '{second}' both map to the filename stem '{stem}'")]
    StemCollision {
        stem: String,
        first: String,
        second: String,
    },

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding or decoding failed.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GlossaryError {
    /// Whether this error comes from malformed constructor input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyTerm
                | Self::MissingDefinition { .. }
                | Self::TypeMismatch { .. }
                | Self::EmptySense { .. }
                | Self::MalformedLine { .. }
        )
    }
}
