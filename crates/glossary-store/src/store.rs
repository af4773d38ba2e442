//! Document stores.
//!
//! A [`DocumentStore`] is the narrow filesystem surface the repository
//! needs: read and write whole documents, list documents under a
//! directory, and create directories. [`FsStore`] is backed by the real
//! filesystem; [`crate::MemoryStore`] keeps everything in memory for tests.
//!
//! Tabular ingestion reads through [`LineSource`], which every store
//! implements.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{StoreError, StoreResult};

// ============================================================================
// Configuration
// ============================================================================

/// Where documents live and how exports treat existing files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Root directory of the per-entry YAML documents.
    pub glossary_root: PathBuf,
    /// Root directory of the Markdown pages.
    pub pages_root: PathBuf,
    /// Replace per-entry documents that already exist.
    pub overwrite: bool,
    /// Create the pages root when it does not exist.
    pub create_dirs: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            glossary_root: PathBuf::from("glossary"),
            pages_root: PathBuf::from("pages"),
            overwrite: false,
            create_dirs: false,
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn with_glossary_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.glossary_root = root.into();
        self
    }

    #[must_use]
    pub fn with_pages_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.pages_root = root.into();
        self
    }

    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Whole-document storage.
pub trait DocumentStore {
    /// Reads a document's bytes.
    fn read(&self, path: &Path) -> StoreResult<Vec<u8>>;

    /// Writes a document, replacing any existing one. The parent directory
    /// must already exist.
    fn write(&mut self, path: &Path, bytes: &[u8]) -> StoreResult<()>;

    /// Lists documents with `extension` anywhere under `dir`, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingDirectory`] if `dir` does not exist.
    fn list(&self, dir: &Path, extension: &str) -> StoreResult<Vec<PathBuf>>;

    /// Whether a document or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Creates `path` and any missing ancestors.
    fn create_dir_all(&mut self, path: &Path) -> StoreResult<()>;

    /// Reads a document as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> StoreResult<String> {
        String::from_utf8(self.read(path)?).map_err(|_| StoreError::InvalidUtf8 {
            path: path.to_path_buf(),
        })
    }
}

/// A source of text lines, one record per line.
pub trait LineSource {
    fn read_lines(&self, path: &Path) -> StoreResult<Vec<String>>;
}

impl<S: DocumentStore + ?Sized> LineSource for S {
    fn read_lines(&self, path: &Path) -> StoreResult<Vec<String>> {
        Ok(self
            .read_to_string(path)?
            .lines()
            .map(str::to_owned)
            .collect())
    }
}

// ============================================================================
// Filesystem store
// ============================================================================

/// Store backed by the local filesystem.
///
/// Writes go to a temporary file in the destination directory which is then
/// renamed over the target, so readers never see a half-written document.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FsStore {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for FsStore {
    fn read(&self, path: &Path) -> StoreResult<Vec<u8>> {
        fs::read(path).map_err(|e| StoreError::io(path, e))
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> StoreResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
        temp.write_all(bytes).map_err(|e| StoreError::io(path, e))?;
        temp.flush().map_err(|e| StoreError::io(path, e))?;
        temp.persist(path)
            .map_err(|e| StoreError::io(path, e.error))?;
        Ok(())
    }

    fn list(&self, dir: &Path, extension: &str) -> StoreResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(StoreError::MissingDirectory(dir.to_path_buf()));
        }
        let mut found = Vec::new();
        collect_files(dir, extension, &mut found)?;
        found.sort();
        Ok(found)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&mut self, path: &Path) -> StoreResult<()> {
        fs::create_dir_all(path).map_err(|e| StoreError::io(path, e))
    }
}

fn collect_files(dir: &Path, extension: &str, found: &mut Vec<PathBuf>) -> StoreResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| StoreError::io(dir, e))?.path();
        if path.is_dir() {
            collect_files(&path, extension, found)?;
        } else if path.extension().is_some_and(|ext| ext == extension) {
            found.push(path);
        }
    }
    Ok(())
}
