//! Structured document formats.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::GlossaryResult;

/// Encoding used for aggregate and per-entry documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML, the per-entry document format.
    #[default]
    Yaml,
}

impl DocumentFormat {
    /// Picks a format from a file extension (`json`, `yml`, `yaml`).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Picks a format from the extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical file extension.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yml",
        }
    }

    /// Encodes `value` as a document string.
    pub fn encode<T: Serialize + ?Sized>(self, value: &T) -> GlossaryResult<String> {
        Ok(match self {
            Self::Json => serde_json::to_string_pretty(value)?,
            Self::Yaml => serde_yaml::to_string(value)?,
        })
    }

    /// Decodes a document string.
    pub fn decode<T: DeserializeOwned>(self, text: &str) -> GlossaryResult<T> {
        Ok(match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Yaml => serde_yaml::from_str(text)?,
        })
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}
