use crate::{Config, Result};
use compdb_engine::ClassifierOptions;
use compdb_store::{DatabaseStore, StoreMode, StoreSummary};
use compdb_types::Invocation;
use serde::Serialize;
use tracing::{debug, info, warn};

/// What happened to one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Number of records written for the invocation's source files.
    Recorded(usize),
    /// Classified fine, but no source files were found.
    NoSources,
    /// Tokenization or classification failed; the invocation was dropped.
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub invocations: usize,
    pub records: usize,
    pub without_sources: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub stats: SessionStats,
    pub store: StoreSummary,
}

/// One logger session: created at build start, shut down exactly once at the end.
///
/// Per-invocation failures are logged and skipped; only store failures
/// surface as errors.
pub struct LoggerSession {
    options: ClassifierOptions,
    store: DatabaseStore,
    stats: SessionStats,
}

impl LoggerSession {
    /// Open the output described by `config`. Errors here abort the session.
    pub fn initialize(config: &Config) -> Result<Self> {
        let options = config.classifier_options()?;
        let store = DatabaseStore::open(config.mode, &config.output_path)?;
        info!(
            output = %config.output_path.display(),
            mode = %config.mode,
            "Logger session started"
        );
        Ok(Self::with_store(store, options))
    }

    pub fn with_store(store: DatabaseStore, options: ClassifierOptions) -> Self {
        Self {
            options,
            store,
            stats: SessionStats::default(),
        }
    }

    pub fn mode(&self) -> StoreMode {
        self.store.mode()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn record(&mut self, invocation: &Invocation) -> Result<RecordOutcome> {
        self.stats.invocations += 1;

        let records = match compdb_engine::records_for(invocation, &self.options) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    task = %invocation.task_name,
                    directory = %invocation.project_directory,
                    error = %err,
                    "Skipping compiler invocation"
                );
                self.stats.skipped += 1;
                return Ok(RecordOutcome::Skipped);
            }
        };

        if records.is_empty() {
            debug!(
                command_line = %invocation.command_line,
                "No source files recognized in compiler invocation"
            );
            self.stats.without_sources += 1;
            return Ok(RecordOutcome::NoSources);
        }

        let count = records.len();
        for record in records {
            self.store.add(record)?;
        }
        self.stats.records += count;
        Ok(RecordOutcome::Recorded(count))
    }

    /// Finalize the output and release it.
    pub fn shutdown(self) -> Result<SessionReport> {
        let stats = self.stats;
        let store = self.store.finish()?;
        info!(
            invocations = stats.invocations,
            records = store.records,
            skipped = stats.skipped,
            "Logger session finished"
        );
        Ok(SessionReport { stats, store })
    }
}
