use serde::{Deserialize, Serialize};

/// One entry of a Clang JSON compilation database.
///
/// Field order is the serialization order: `directory`, `command`, `file`.
/// `file` is kept exactly as it appeared on the command line and is the
/// lookup key inside a merged database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileCommandRecord {
    /// Working directory of the compilation (the project directory).
    pub directory: String,
    /// Full, reconstructable compiler invocation.
    pub command: String,
    /// Source file as written on the command line.
    pub file: String,
}

impl CompileCommandRecord {
    pub fn new(
        directory: impl Into<String>,
        command: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            command: command.into(),
            file: file.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.file
    }

    /// Overwrite the mutable part of the record with a later observation.
    pub fn refresh_from(&mut self, newer: CompileCommandRecord) {
        debug_assert_eq!(self.file, newer.file);
        self.directory = newer.directory;
        self.command = newer.command;
    }
}
