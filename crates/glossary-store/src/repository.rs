//! Repository: glossary operations against a document store.
//!
//! The repository turns a [`Glossary`] into documents and back:
//! - one YAML document per entry under `<glossary_root>/<letter>/`
//! - one Markdown page per entry under `<pages_root>/<letter>/`, plus an
//!   `_index.md` per letter
//! - a single aggregate document (JSON or YAML by extension)
//! - tabular ingestion from comma-delimited lines

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use glossary_core::naming::{self, OutputKind};
use glossary_core::render;
use glossary_core::tabular::{self, TabularOptions};
use glossary_core::{DocumentFormat, Entry, Glossary, GlossaryError};

use crate::error::{StoreError, StoreResult};
use crate::store::{DocumentStore, LineSource, StoreConfig};

/// File name of the per-letter page index.
///
/// Only a term whose stem is `_index` could produce the same name; such a
/// term is rejected by [`Repository::export_pages`].
pub const INDEX_PAGE: &str = "_index.md";

/// Outcome of an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Documents written, in write order.
    pub written: Vec<PathBuf>,
    /// Existing documents left untouched.
    pub skipped: Vec<PathBuf>,
}

impl ExportReport {
    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Glossary operations over a [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct Repository<S> {
    store: S,
    config: StoreConfig,
}

impl<S: DocumentStore> Repository<S> {
    pub fn new(store: S, config: StoreConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ========================================================================
    // Per-entry documents
    // ========================================================================

    /// Path of the per-entry document for `term`.
    pub fn entry_path(&self, term: &str) -> StoreResult<PathBuf> {
        Ok(naming::letter_path(
            term,
            &self.config.glossary_root,
            OutputKind::Document,
        )?)
    }

    /// The path and YAML text that [`Self::export_entries`] would write for
    /// `entry`, without touching the store.
    pub fn render_entry_document(&self, entry: &Entry) -> StoreResult<(PathBuf, String)> {
        let path = self.entry_path(entry.term())?;
        Ok((path, entry.to_yaml()?))
    }

    /// Writes one YAML document per entry.
    ///
    /// Every path is derived before anything is written, so an unsafe term,
    /// or two terms sharing a filename stem, aborts the export with no
    /// documents changed. Existing documents are skipped unless
    /// [`StoreConfig::overwrite`] is set.
    pub fn export_entries(&mut self, glossary: &Glossary) -> StoreResult<ExportReport> {
        let planned = glossary
            .iter()
            .map(|entry| self.entry_path(entry.term()).map(|path| (path, entry)))
            .collect::<StoreResult<Vec<_>>>()?;
        distinct_paths(
            planned
                .iter()
                .map(|(path, entry)| (path.as_path(), entry.term())),
        )?;

        let mut report = ExportReport::default();
        for (path, entry) in planned {
            if self.store.exists(&path) && !self.config.overwrite {
                tracing::warn!(
                    path = %path.display(),
                    term = entry.term(),
                    "document exists and overwrite is disabled, skipping"
                );
                report.skipped.push(path);
                continue;
            }

            let document = entry.to_yaml()?;
            self.write_creating_parent(&path, document.as_bytes())?;
            tracing::debug!(path = %path.display(), term = entry.term(), "wrote entry document");
            report.written.push(path);
        }

        tracing::info!(
            glossary = glossary.name(),
            root = %self.config.glossary_root.display(),
            written = report.written_count(),
            skipped = report.skipped_count(),
            "exported entry documents"
        );
        Ok(report)
    }

    /// Loads every `.yml` document under the glossary root into a new
    /// glossary named `name`.
    ///
    /// Documents are read in path order. A document that fails to parse, or
    /// whose term is already loaded, aborts the import.
    pub fn import_entries(&self, name: &str) -> StoreResult<Glossary> {
        let root = &self.config.glossary_root;
        let paths = self.store.list(root, OutputKind::Document.extension())?;

        let mut glossary = Glossary::new(name);
        for path in paths {
            let text = self.store.read_to_string(&path)?;
            let entry = Entry::from_yaml(&text).map_err(|e| StoreError::document(&path, e))?;
            glossary
                .add(entry)
                .map_err(|e| StoreError::document(&path, e))?;
            tracing::debug!(path = %path.display(), "loaded entry document");
        }

        tracing::info!(
            glossary = name,
            root = %root.display(),
            count = glossary.count(),
            "imported entry documents"
        );
        Ok(glossary)
    }

    // ========================================================================
    // Pages
    // ========================================================================

    /// Writes one Markdown page per entry and an index page per letter.
    ///
    /// Pages are regenerated output and always replace existing files. The
    /// pages root must exist unless [`StoreConfig::create_dirs`] is set.
    /// Terms sharing a filename stem, or a term whose page would replace a
    /// letter index, abort the export before anything is written.
    pub fn export_pages(&mut self, glossary: &Glossary) -> StoreResult<ExportReport> {
        let root = self.config.pages_root.clone();
        let root_exists = self.store.is_dir(&root);
        if !root_exists && !self.config.create_dirs {
            return Err(StoreError::MissingDirectory(root));
        }

        let mut letters: BTreeMap<char, Vec<&str>> = BTreeMap::new();
        let mut planned = Vec::with_capacity(glossary.len());
        for entry in glossary {
            let letter = naming::first_letter(entry.term())?;
            let path = naming::letter_path(entry.term(), &root, OutputKind::Page)?;
            letters.entry(letter).or_default().push(entry.term());
            planned.push((path, entry));
        }

        let indexes: Vec<(char, PathBuf)> = letters
            .keys()
            .map(|letter| (*letter, root.join(letter.to_string()).join(INDEX_PAGE)))
            .collect();
        let owners = distinct_paths(
            planned
                .iter()
                .map(|(path, entry)| (path.as_path(), entry.term())),
        )?;
        for (letter, path) in &indexes {
            if let Some(term) = owners.get(path.as_path()) {
                return Err(GlossaryError::StemCollision {
                    stem: stem_of(path),
                    first: (*term).to_owned(),
                    second: format!("index of '{letter}'"),
                }
                .into());
            }
        }

        if !root_exists {
            self.store.create_dir_all(&root)?;
        }

        let mut report = ExportReport::default();
        for (path, entry) in planned {
            self.write_creating_parent(&path, entry.to_page().as_bytes())?;
            tracing::debug!(path = %path.display(), term = entry.term(), "wrote page");
            report.written.push(path);
        }

        for (letter, path) in indexes {
            let terms = letters.get(&letter).map(Vec::as_slice).unwrap_or_default();
            let page = render::letter_index_page(letter, terms)?;
            self.store.write(&path, page.as_bytes())?;
            report.written.push(path);
        }

        tracing::info!(
            glossary = glossary.name(),
            root = %root.display(),
            pages = glossary.len(),
            letters = letters.len(),
            "exported pages"
        );
        Ok(report)
    }

    // ========================================================================
    // Aggregate document
    // ========================================================================

    /// Writes the whole glossary as one document, JSON or YAML by extension.
    pub fn save_aggregate(&mut self, glossary: &Glossary, path: &Path) -> StoreResult<()> {
        let format = aggregate_format(path)?;
        let text = glossary.to_document_string(format)?;
        self.write_creating_parent(path, text.as_bytes())?;
        tracing::info!(
            glossary = glossary.name(),
            path = %path.display(),
            %format,
            count = glossary.count(),
            "saved aggregate document"
        );
        Ok(())
    }

    /// Reads a glossary from one aggregate document.
    pub fn load_aggregate(&self, path: &Path) -> StoreResult<Glossary> {
        let format = aggregate_format(path)?;
        let text = self.store.read_to_string(path)?;
        let glossary = Glossary::from_document_str(&text, format)
            .map_err(|e| StoreError::document(path, e))?;
        tracing::info!(
            glossary = glossary.name(),
            path = %path.display(),
            count = glossary.count(),
            "loaded aggregate document"
        );
        Ok(glossary)
    }

    // ========================================================================
    // Tabular ingestion
    // ========================================================================

    /// Builds a glossary from a comma-delimited file in the store.
    pub fn ingest_tabular(
        &self,
        path: &Path,
        name: &str,
        options: TabularOptions,
    ) -> StoreResult<Glossary> {
        load_tabular(&self.store, path, name, options)
    }

    fn write_creating_parent(&mut self, path: &Path, bytes: &[u8]) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !self.store.is_dir(parent) {
                self.store.create_dir_all(parent)?;
            }
        }
        self.store.write(path, bytes)
    }
}

/// Builds a glossary from comma-delimited lines read from `source`.
///
/// A malformed line, an invalid definition or a repeated term aborts the
/// load with an error naming `path`.
pub fn load_tabular<L: LineSource + ?Sized>(
    source: &L,
    path: &Path,
    name: &str,
    options: TabularOptions,
) -> StoreResult<Glossary> {
    let lines = source.read_lines(path)?;
    let parsed = tabular::parse_lines(&lines, options).map_err(|e| StoreError::document(path, e))?;

    let mut glossary = Glossary::new(name);
    for row in parsed {
        let entry = row.into_entry().map_err(|e| StoreError::document(path, e))?;
        glossary
            .add(entry)
            .map_err(|e| StoreError::document(path, e))?;
    }

    tracing::info!(
        glossary = name,
        path = %path.display(),
        count = glossary.count(),
        "ingested tabular file"
    );
    Ok(glossary)
}

/// Maps each planned path to the term that owns it, failing on the first
/// path claimed twice.
fn distinct_paths<'a, I>(planned: I) -> StoreResult<HashMap<&'a Path, &'a str>>
where
    I: IntoIterator<Item = (&'a Path, &'a str)>,
{
    let mut owners: HashMap<&Path, &str> = HashMap::new();
    for (path, term) in planned {
        if let Some(first) = owners.insert(path, term) {
            return Err(GlossaryError::StemCollision {
                stem: stem_of(path),
                first: first.to_owned(),
                second: term.to_owned(),
            }
            .into());
        }
    }
    Ok(owners)
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn aggregate_format(path: &Path) -> StoreResult<DocumentFormat> {
    DocumentFormat::from_path(path).ok_or_else(|| StoreError::UnknownFormat(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::store::FsStore;
    use glossary_core::GlossaryError;
    use tempfile::TempDir;

    fn sample() -> Glossary {
        Glossary::from_entries(
            "Cryosphere glossary",
            [
                Entry::builder("ablation")
                    .definition(["Combined processes.", "Reduction of the water equivalent."])
                    .see_also(["accumulation"])
                    .build()
                    .unwrap(),
                Entry::new("accumulation", "All processes that add to the mass.").unwrap(),
                Entry::builder("Firn")
                    .definition("Snow that has survived one melt season.")
                    .synonym(["névé"])
                    .build()
                    .unwrap(),
            ],
        )
        .unwrap()
    }

    fn memory_repo(config: StoreConfig) -> Repository<MemoryStore> {
        Repository::new(MemoryStore::new(), config)
    }

    #[test]
    fn export_writes_letter_directories() {
        let mut repo = memory_repo(StoreConfig::default());
        let report = repo.export_entries(&sample()).unwrap();

        assert_eq!(
            report.written,
            vec![
                PathBuf::from("glossary/a/ablation.yml"),
                PathBuf::from("glossary/a/accumulation.yml"),
                PathBuf::from("glossary/f/firn.yml"),
            ]
        );
        assert!(report.skipped.is_empty());

        let text = repo
            .store()
            .read_to_string(Path::new("glossary/f/firn.yml"))
            .unwrap();
        assert!(text.starts_with("term: firn\n"));
    }

    #[test]
    fn export_without_overwrite_leaves_existing_documents() {
        let mut store = MemoryStore::new();
        store.insert("glossary/f/firn.yml", "term: firn\ndefinition: hand edited\n");
        let mut repo = Repository::new(store, StoreConfig::default());

        let report = repo.export_entries(&sample()).unwrap();

        assert_eq!(report.skipped, vec![PathBuf::from("glossary/f/firn.yml")]);
        assert_eq!(report.written_count(), 2);
        assert_eq!(
            repo.store()
                .read_to_string(Path::new("glossary/f/firn.yml"))
                .unwrap(),
            "term: firn\ndefinition: hand edited\n"
        );
    }

    #[test]
    fn export_with_overwrite_replaces_documents() {
        let mut store = MemoryStore::new();
        store.insert("glossary/f/firn.yml", "stale");
        let mut repo = Repository::new(store, StoreConfig::default().with_overwrite(true));

        let report = repo.export_entries(&sample()).unwrap();

        assert_eq!(report.written_count(), 3);
        assert!(report.skipped.is_empty());
        let text = repo
            .store()
            .read_to_string(Path::new("glossary/f/firn.yml"))
            .unwrap();
        assert_eq!(Entry::from_yaml(&text).unwrap().term(), "firn");
    }

    #[test]
    fn unsafe_term_aborts_before_writing() {
        let mut glossary = sample();
        glossary.add(Entry::new("a.b", "dotted").unwrap()).unwrap();
        let mut repo = memory_repo(StoreConfig::default());

        let err = repo.export_entries(&glossary).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Glossary(GlossaryError::PathSafety { ref stem }) if stem == "a.b"
        ));
        assert!(repo.store().is_empty());
    }

    fn shared_stem_glossary() -> Glossary {
        Glossary::from_entries(
            "shared stems",
            [
                Entry::new("ice-sheet", "A mass of glacier ice.").unwrap(),
                Entry::new("ice sheet", "Written without the hyphen.").unwrap(),
            ],
        )
        .unwrap()
    }

    fn assert_stem_collision(err: StoreError, expected_stem: &str) {
        match err {
            StoreError::Glossary(GlossaryError::StemCollision { stem, first, second }) => {
                assert_eq!(stem, expected_stem);
                assert_ne!(first, second);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn terms_sharing_a_stem_abort_entry_export() {
        let glossary = shared_stem_glossary();
        let mut repo = memory_repo(StoreConfig::default());

        let err = repo.export_entries(&glossary).unwrap_err();

        assert_stem_collision(err, "ice_sheet");
        assert!(repo.store().is_empty());
    }

    #[test]
    fn terms_sharing_a_stem_abort_even_with_overwrite() {
        let glossary = Glossary::from_entries(
            "apostrophes",
            [
                Entry::new("glen's law", "Flow law of ice.").unwrap(),
                Entry::new("glens law", "Same law, no apostrophe.").unwrap(),
            ],
        )
        .unwrap();
        let mut repo = memory_repo(StoreConfig::default().with_overwrite(true));

        let err = repo.export_entries(&glossary).unwrap_err();

        match err {
            StoreError::Glossary(GlossaryError::StemCollision { stem, first, second }) => {
                assert_eq!(stem, "glens_law");
                assert_eq!(first, "glen's law");
                assert_eq!(second, "glens law");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(repo.store().is_empty());
    }

    #[test]
    fn terms_sharing_a_stem_abort_page_export() {
        let glossary = shared_stem_glossary();
        let mut repo = memory_repo(StoreConfig::default().with_create_dirs(true));

        let err = repo.export_pages(&glossary).unwrap_err();

        assert_stem_collision(err, "ice_sheet");
        assert!(repo.store().is_empty());
    }

    #[test]
    fn page_for_index_term_survives_letter_index() {
        let glossary =
            Glossary::from_entries("index", [Entry::new("index", "A list of terms.").unwrap()])
                .unwrap();
        let mut repo = memory_repo(StoreConfig::default().with_create_dirs(true));

        let report = repo.export_pages(&glossary).unwrap();

        assert_eq!(
            report.written,
            vec![
                PathBuf::from("pages/i/index.md"),
                PathBuf::from("pages/i/_index.md"),
            ]
        );
        let page = repo
            .store()
            .read_to_string(Path::new("pages/i/index.md"))
            .unwrap();
        assert!(page.contains("A list of terms."));
        let index = repo
            .store()
            .read_to_string(Path::new("pages/i/_index.md"))
            .unwrap();
        assert!(index.contains("[Index](index.md)"));
    }

    #[test]
    fn term_claiming_the_index_page_is_rejected() {
        let glossary =
            Glossary::from_entries("index", [Entry::new("- index", "Leading dash.").unwrap()])
                .unwrap();
        let mut repo = memory_repo(StoreConfig::default().with_create_dirs(true));

        let err = repo.export_pages(&glossary).unwrap_err();

        match err {
            StoreError::Glossary(GlossaryError::StemCollision { stem, first, .. }) => {
                assert_eq!(stem, "_index");
                assert_eq!(first, "- index");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(repo.store().is_empty());
    }

    #[test]
    fn export_then_import_counts_documents() {
        let glossary = sample();
        let mut repo = memory_repo(StoreConfig::default());
        repo.export_entries(&glossary).unwrap();

        let imported = repo.import_entries("Cryosphere glossary").unwrap();

        assert_eq!(imported.count(), 3);
        assert_eq!(imported, glossary);
    }

    #[test]
    fn import_reports_the_bad_document() {
        let mut store = MemoryStore::new();
        store.insert("glossary/f/firn.yml", "term: firn\ndefinition: 42\n");
        let repo = Repository::new(store, StoreConfig::default());

        let err = repo.import_entries("broken").unwrap_err();

        match err {
            StoreError::Document { path, source } => {
                assert_eq!(path, PathBuf::from("glossary/f/firn.yml"));
                assert!(source.is_validation() || matches!(source, GlossaryError::Yaml(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn import_missing_root() {
        let repo = memory_repo(StoreConfig::default());
        let err = repo.import_entries("empty").unwrap_err();
        assert!(matches!(err, StoreError::MissingDirectory(ref p) if p == Path::new("glossary")));
    }

    #[test]
    fn render_entry_document_does_not_write() {
        let repo = memory_repo(StoreConfig::default().with_glossary_root("out"));
        let glossary = sample();
        let entry = glossary.find("ablation").unwrap();

        let (path, text) = repo.render_entry_document(entry).unwrap();

        assert_eq!(path, PathBuf::from("out/a/ablation.yml"));
        assert_eq!(text, entry.to_yaml().unwrap());
        assert!(repo.store().is_empty());
    }

    #[test]
    fn pages_require_existing_root() {
        let mut repo = memory_repo(StoreConfig::default());
        let err = repo.export_pages(&sample()).unwrap_err();
        assert!(matches!(err, StoreError::MissingDirectory(ref p) if p == Path::new("pages")));
        assert!(repo.store().is_empty());
    }

    #[test]
    fn pages_with_create_dirs() {
        let mut repo = memory_repo(StoreConfig::default().with_create_dirs(true));
        let report = repo.export_pages(&sample()).unwrap();

        assert_eq!(
            report.written,
            vec![
                PathBuf::from("pages/a/ablation.md"),
                PathBuf::from("pages/a/accumulation.md"),
                PathBuf::from("pages/f/firn.md"),
                PathBuf::from("pages/a/_index.md"),
                PathBuf::from("pages/f/_index.md"),
            ]
        );

        let index = repo
            .store()
            .read_to_string(Path::new("pages/a/_index.md"))
            .unwrap();
        assert!(index.contains("[Ablation](ablation.md)"));
        assert!(index.contains("[Accumulation](accumulation.md)"));

        let page = repo
            .store()
            .read_to_string(Path::new("pages/f/firn.md"))
            .unwrap();
        assert!(page.starts_with("# Firn\n"));
    }

    #[test]
    fn pages_into_existing_root_overwrite() {
        let mut store = MemoryStore::new();
        store.insert("pages/f/firn.md", "old page");
        let mut repo = Repository::new(store, StoreConfig::default());

        repo.export_pages(&sample()).unwrap();

        let page = repo
            .store()
            .read_to_string(Path::new("pages/f/firn.md"))
            .unwrap();
        assert_ne!(page, "old page");
    }

    #[test]
    fn aggregate_roundtrip_by_extension() {
        let glossary = sample();
        let mut repo = memory_repo(StoreConfig::default());

        for name in ["glossary.json", "glossary.yml", "out/glossary.yaml"] {
            let path = Path::new(name);
            repo.save_aggregate(&glossary, path).unwrap();
            assert_eq!(repo.load_aggregate(path).unwrap(), glossary);
        }

        let json: serde_json::Value = serde_json::from_str(
            &repo
                .store()
                .read_to_string(Path::new("glossary.json"))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn aggregate_unknown_extension() {
        let mut repo = memory_repo(StoreConfig::default());
        let err = repo
            .save_aggregate(&sample(), Path::new("glossary.txt"))
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownFormat(_)));
    }

    #[test]
    fn ingest_tabular_file() {
        let mut store = MemoryStore::new();
        store.insert(
            "terms.csv",
            "term,definition\n\
             ablation,\"(1) combined processes (2) reduction of the water equivalent\"\n\
             firn,snow that has survived one melt season\n",
        );
        let repo = Repository::new(store, StoreConfig::default());

        let glossary = repo
            .ingest_tabular(Path::new("terms.csv"), "ingested", TabularOptions::default())
            .unwrap();

        assert_eq!(glossary.count(), 2);
        let ablation = glossary.find("ablation").unwrap();
        assert_eq!(ablation.definition().get(1), Some("Combined processes."));
        assert_eq!(
            ablation.definition().get(2),
            Some("Reduction of the water equivalent.")
        );
    }

    #[test]
    fn ingest_duplicate_term_names_the_file() {
        let mut store = MemoryStore::new();
        store.insert("terms.csv", "firn,old snow\nFirn,older snow\n");
        let repo = Repository::new(store, StoreConfig::default());
        let options = TabularOptions {
            skip_rows: 0,
            has_header: false,
        };

        let err = repo
            .ingest_tabular(Path::new("terms.csv"), "dupes", options)
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Document { source: GlossaryError::Collision { .. }, .. }
        ));
    }

    #[test]
    fn filesystem_export_import() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::default()
            .with_glossary_root(dir.path().join("glossary"))
            .with_pages_root(dir.path().join("pages"))
            .with_create_dirs(true);
        let mut repo = Repository::new(FsStore::new(), config);
        let glossary = sample();

        let report = repo.export_entries(&glossary).unwrap();
        assert_eq!(report.written_count(), 3);
        assert!(dir.path().join("glossary/a/ablation.yml").is_file());

        let imported = repo.import_entries("Cryosphere glossary").unwrap();
        assert_eq!(imported, glossary);

        repo.export_pages(&glossary).unwrap();
        assert!(dir.path().join("pages/f/firn.md").is_file());
        assert!(dir.path().join("pages/f/_index.md").is_file());

        let again = repo.export_entries(&glossary).unwrap();
        assert_eq!(again.skipped_count(), 3);
    }
}
