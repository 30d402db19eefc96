// Compilation database store
// Owns the output for one logger session: either an in-memory database that
// is merged and rewritten at shutdown, or a stream appended per record.

mod error;
mod merging;
mod streaming;

use compdb_types::CompileCommandRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// Public API
pub use error::{Error, LoadError, Result};
pub use merging::{MergingStore, UpsertOutcome, load_records};
pub use streaming::StreamingStore;

/// Store discipline for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// Load the existing database, upsert by file, rewrite once at shutdown.
    #[default]
    Merge,
    /// Truncate at start, append every observation, close the array at shutdown.
    Stream,
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreMode::Merge => write!(f, "merge"),
            StoreMode::Stream => write!(f, "stream"),
        }
    }
}

impl FromStr for StoreMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "merge" => Ok(StoreMode::Merge),
            "stream" => Ok(StoreMode::Stream),
            _ => Err(format!("unknown store mode '{}' (expected merge or stream)", s)),
        }
    }
}

/// What a finished store left on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreSummary {
    /// Records in the written database (merge) or records appended (stream).
    pub records: usize,
    /// Records carried over from a previous run (merge only).
    pub loaded: usize,
}

/// Mode-dispatching store owned by a logger session.
pub enum DatabaseStore {
    Merging(MergingStore),
    Streaming(StreamingStore<std::fs::File>),
}

impl DatabaseStore {
    /// Open the output for the given mode. Failure here is fatal for the session.
    pub fn open(mode: StoreMode, path: &Path) -> Result<Self> {
        match mode {
            StoreMode::Merge => MergingStore::open(path).map(DatabaseStore::Merging),
            StoreMode::Stream => StreamingStore::create(path).map(DatabaseStore::Streaming),
        }
    }

    pub fn mode(&self) -> StoreMode {
        match self {
            DatabaseStore::Merging(_) => StoreMode::Merge,
            DatabaseStore::Streaming(_) => StoreMode::Stream,
        }
    }

    pub fn add(&mut self, record: CompileCommandRecord) -> Result<()> {
        match self {
            DatabaseStore::Merging(store) => {
                store.upsert(record);
                Ok(())
            }
            DatabaseStore::Streaming(store) => store.append(&record),
        }
    }

    /// Write the final output. Consumes the store so this runs exactly once.
    pub fn finish(self) -> Result<StoreSummary> {
        match self {
            DatabaseStore::Merging(store) => store.finish(),
            DatabaseStore::Streaming(store) => {
                let records = store.written();
                store.finish()?;
                Ok(StoreSummary { records, loaded: 0 })
            }
        }
    }
}
