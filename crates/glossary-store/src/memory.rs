//! In-memory document store.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::store::DocumentStore;

/// A [`DocumentStore`] that keeps documents and directories in memory.
///
/// It enforces the same rules as the filesystem: writing needs an existing
/// parent directory and reading a missing document is an I/O error. The
/// empty path (the current directory) always exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, creating its parent directories.
    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dirs(parent);
        }
        self.files.insert(path, bytes.into());
    }

    /// Paths of every stored document, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn add_dirs(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

fn not_found(path: &Path, what: &str) -> StoreError {
    StoreError::io(path, io::Error::new(io::ErrorKind::NotFound, what.to_owned()))
}

impl DocumentStore for MemoryStore {
    fn read(&self, path: &Path) -> StoreResult<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path, "no such document"))
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> StoreResult<()> {
        if self.dirs.contains(path) {
            return Err(StoreError::io(path, io::Error::other("path is a directory")));
        }
        if let Some(parent) = path.parent() {
            if !self.is_dir(parent) {
                return Err(not_found(parent, "parent directory does not exist"));
            }
        }
        self.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn list(&self, dir: &Path, extension: &str) -> StoreResult<Vec<PathBuf>> {
        if !self.is_dir(dir) {
            return Err(StoreError::MissingDirectory(dir.to_path_buf()));
        }
        Ok(self
            .files
            .keys()
            .filter(|path| path.starts_with(dir))
            .filter(|path| path.extension().is_some_and(|ext| ext == extension))
            .cloned()
            .collect())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || self.dirs.contains(path)
    }

    fn create_dir_all(&mut self, path: &Path) -> StoreResult<()> {
        if self.files.contains_key(path) {
            return Err(StoreError::io(
                path,
                io::Error::new(io::ErrorKind::AlreadyExists, "a document exists at this path"),
            ));
        }
        self.add_dirs(path);
        Ok(())
    }
}
