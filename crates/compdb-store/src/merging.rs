use compdb_types::CompileCommandRecord;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::StoreSummary;
use crate::error::{Error, LoadError, Result};

/// Outcome of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Read a compilation database from disk.
///
/// An empty (or whitespace-only) file is an empty database.
pub fn load_records(path: &Path) -> std::result::Result<Vec<CompileCommandRecord>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// In-memory database keyed by source file, written once at shutdown.
#[derive(Debug, Default)]
pub struct MergingStore {
    path: Option<PathBuf>,
    records: Vec<CompileCommandRecord>,
    index: HashMap<String, usize>,
    loaded: usize,
}

impl MergingStore {
    /// Empty store with no backing file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing records.
    ///
    /// Repeated keys collapse onto the first occurrence, later values winning.
    pub fn from_records(records: impl IntoIterator<Item = CompileCommandRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.upsert(record);
        }
        store.loaded = store.records.len();
        store
    }

    /// Load `path` if it holds a database and check that it can be written.
    ///
    /// An unreadable or malformed database is logged and replaced by an empty one.
    pub fn open(path: &Path) -> Result<Self> {
        let existing = if path.exists() {
            match load_records(path) {
                Ok(records) => records,
                Err(err) => {
                    warn!(error = %err, "Ignoring existing compilation database");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        // Probe without truncating; the previous database stays intact until shutdown.
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|source| Error::OutputOpen {
                path: path.to_path_buf(),
                source,
            })?;

        let mut store = Self::from_records(existing);
        store.path = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            loaded = store.loaded,
            "Opened compilation database"
        );
        Ok(store)
    }

    /// Insert a record, or refresh `directory`/`command` of the record with the same file.
    pub fn upsert(&mut self, record: CompileCommandRecord) -> UpsertOutcome {
        match self.index.get(record.key()) {
            Some(&position) => {
                debug!(file = %record.file, "Updating compile command");
                self.records[position].refresh_from(record);
                UpsertOutcome::Updated
            }
            None => {
                debug!(file = %record.file, "Adding compile command");
                self.index.insert(record.file.clone(), self.records.len());
                self.records.push(record);
                UpsertOutcome::Inserted
            }
        }
    }

    pub fn get(&self, file: &str) -> Option<&CompileCommandRecord> {
        self.index.get(file).map(|&position| &self.records[position])
    }

    pub fn records(&self) -> &[CompileCommandRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records that came from the database loaded at open.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    /// Serialize the whole database as a pretty-printed JSON array (truncate + write).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_vec_pretty(&self.records)?;
        content.push(b'\n');
        std::fs::write(path, content).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the database to the path it was opened from, if any.
    pub fn finish(self) -> Result<StoreSummary> {
        if let Some(path) = &self.path {
            self.save_to(path)?;
            info!(
                path = %path.display(),
                records = self.records.len(),
                "Wrote compilation database"
            );
        }
        Ok(StoreSummary {
            records: self.records.len(),
            loaded: self.loaded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(file: &str, command: &str) -> CompileCommandRecord {
        CompileCommandRecord::new("/proj", command, file)
    }

    #[test]
    fn test_upsert_keeps_single_record_per_file() {
        let mut store = MergingStore::from_records([record("a.cpp", "cl /c a.cpp")]);

        let outcome = store.upsert(CompileCommandRecord::new("/other", "cl /O2 a.cpp", "a.cpp"));

        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(store.len(), 1);
        let updated = store.get("a.cpp").unwrap();
        assert_eq!(updated.directory, "/other");
        assert_eq!(updated.command, "cl /O2 a.cpp");
        assert_eq!(updated.file, "a.cpp");
    }

    #[test]
    fn test_upsert_preserves_positions() {
        let mut store = MergingStore::from_records([record("a.cpp", "1"), record("b.cpp", "1")]);
        store.upsert(record("c.cpp", "2"));
        store.upsert(record("a.cpp", "2"));

        let files: Vec<&str> = store.records().iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, ["a.cpp", "b.cpp", "c.cpp"]);
        assert_eq!(store.records()[0].command, "2");
        assert_eq!(store.loaded(), 2);
    }

    #[test]
    fn test_duplicate_keys_collapse_on_load() {
        let store = MergingStore::from_records([
            record("a.cpp", "old"),
            record("b.cpp", "b"),
            record("a.cpp", "new"),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].command, "new");
    }

    #[test]
    fn test_open_missing_file_starts_empty() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("compile_commands.json");

        let store = MergingStore::open(&path)?;
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn test_open_corrupt_file_starts_empty() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("compile_commands.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = MergingStore::open(&path)?;
        assert!(store.is_empty());
        // the corrupt file is left alone until shutdown
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
        Ok(())
    }

    #[test]
    fn test_open_wrong_shape_starts_empty() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("compile_commands.json");
        std::fs::write(&path, r#"{"directory": "/p"}"#).unwrap();

        let store = MergingStore::open(&path)?;
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("compile_commands.json");

        let err = MergingStore::open(&path).unwrap_err();
        assert!(matches!(err, Error::OutputOpen { .. }));
    }

    #[test]
    fn test_load_empty_file_is_empty_database() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("compile_commands.json");
        std::fs::write(&path, "\n").unwrap();

        assert!(load_records(&path).unwrap().is_empty());
    }

    #[test]
    fn test_finish_without_path_writes_nothing() -> Result<()> {
        let mut store = MergingStore::new();
        store.upsert(record("a.cpp", "x"));

        let summary = store.finish()?;
        assert_eq!(summary.records, 1);
        assert_eq!(summary.loaded, 0);
        Ok(())
    }
}
