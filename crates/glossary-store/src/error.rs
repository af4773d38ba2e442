//! Error types for the storage layer.

use std::path::{Path, PathBuf};

use glossary_core::GlossaryError;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a path failed.
    #[error("i/o error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A destination directory does not exist and may not be created.
    #[error("directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// A document is not valid UTF-8.
    #[error("document is not valid UTF-8: {}", .path.display())]
    InvalidUtf8 { path: PathBuf },

    /// A document was read but its content is invalid.
    #[error("invalid document {}: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: GlossaryError,
    },

    /// No document format is associated with the path's extension.
    #[error("cannot infer document format from {}", .0.display())]
    UnknownFormat(PathBuf),

    /// Data model error raised before any I/O (naming, collisions).
    #[error(transparent)]
    Glossary(#[from] GlossaryError),
}

impl StoreError {
    /// Wraps an I/O error with the path it happened at.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wraps a data model error with the document it came from.
    pub fn document(path: impl AsRef<Path>, source: GlossaryError) -> Self {
        Self::Document {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
