use compdb_types::CompileCommandRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Writes a JSON array incrementally, one object per observed source file.
///
/// Nothing is de-duplicated. If the process dies before `finish`, the file
/// is left as an unterminated array.
pub struct StreamingStore<W: Write> {
    writer: BufWriter<W>,
    target: PathBuf,
    written: usize,
}

impl StreamingStore<File> {
    /// Truncate (or create) `path` and write the opening bracket.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| Error::OutputOpen {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Streaming compilation database");
        Self::new(file, path)
    }
}

impl<W: Write> StreamingStore<W> {
    /// Start an array on `writer`; `target` names it in error messages.
    pub fn new(writer: W, target: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self {
            writer: BufWriter::new(writer),
            target: target.into(),
            written: 0,
        };
        store.write_raw(b"[")?;
        store.flush()?;
        Ok(store)
    }

    pub fn append(&mut self, record: &CompileCommandRecord) -> Result<()> {
        let object = serde_json::to_string(record)?;
        let separator: &[u8] = if self.written == 0 { b"\n" } else { b",\n" };

        self.write_raw(separator)?;
        self.write_raw(object.as_bytes())?;
        self.flush()?;

        self.written += 1;
        debug!(file = %record.file, "Appended compile command");
        Ok(())
    }

    /// Number of records appended so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Close the array and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        if self.written > 0 {
            self.write_raw(b"\n")?;
        }
        self.write_raw(b"]\n")?;
        self.flush()?;

        info!(
            path = %self.target.display(),
            records = self.written,
            "Closed compilation database"
        );

        let target = self.target;
        self.writer
            .into_inner()
            .map_err(|err| Error::Write {
                path: target,
                source: err.into_error(),
            })
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes).map_err(|source| Error::Write {
            path: self.target.clone(),
            source,
        })
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| Error::Write {
            path: self.target.clone(),
            source,
        })
    }
}
