//! Feeds recorded build events into a logger session.
//!
//! Events are JSON Lines, one `TaskCommandLineEvent` per line. Blank lines
//! are skipped and malformed lines (bad JSON or bad UTF-8) only produce a warning.

use crate::filter::TaskFilter;
use crate::session::{LoggerSession, SessionReport};
use crate::{Config, Error, Result};
use compdb_types::TaskCommandLineEvent;
use serde::Serialize;
use std::io::BufRead;
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub events: usize,
    pub accepted: usize,
    pub malformed: usize,
}

pub fn replay_events<R: BufRead>(
    mut reader: R,
    filter: &TaskFilter,
    session: &mut LoggerSession,
) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(Error::Io)? == 0 {
            break;
        }
        line_number += 1;

        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let event: TaskCommandLineEvent = match serde_json::from_slice(line) {
            Ok(event) => event,
            Err(err) => {
                warn!(line = line_number, error = %err, "Skipping malformed event");
                stats.malformed += 1;
                continue;
            }
        };
        stats.events += 1;

        let Some(invocation) = filter.select(&event) else {
            trace!(task = %event.task_name, "Ignoring task");
            continue;
        };
        stats.accepted += 1;
        session.record(&invocation)?;
    }

    Ok(stats)
}

/// Run one full session over `reader`: initialize, replay, shut down.
///
/// The store is finalized even when replay stops on an error, so records
/// accepted before the failure reach the output. The replay error is still
/// returned afterwards.
pub fn run_session<R: BufRead>(
    config: &Config,
    reader: R,
) -> Result<(ReplayStats, SessionReport)> {
    let filter = config.task_filter();
    let mut session = LoggerSession::initialize(config)?;

    let replayed = replay_events(reader, &filter, &mut session);
    let report = session.shutdown()?;
    let stats = replayed?;

    Ok((stats, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use compdb_engine::ClassifierOptions;
    use compdb_store::{DatabaseStore, MergingStore, load_records};
    use std::io::{BufReader, Cursor, Read};
    use tempfile::TempDir;

    fn in_memory_session() -> LoggerSession {
        LoggerSession::with_store(
            DatabaseStore::Merging(MergingStore::new()),
            ClassifierOptions::default(),
        )
    }

    fn compile_event(file: &str) -> String {
        format!(
            r#"{{"task_name":"CL","project_file":"/p/app.vcxproj","command_line":"cl.exe /c {}"}}"#,
            file
        )
    }

    #[test]
    fn test_replay_filters_and_skips_malformed_lines() -> Result<()> {
        let input = concat!(
            r#"{"task_name":"CL","project_file":"/p/app.vcxproj","command_line":"cl.exe /c a.cpp"}"#,
            "\n\n",
            "not json\n",
            r#"{"task_name":"Link","project_file":"/p/app.vcxproj","command_line":"link.exe a.obj"}"#,
            "\n",
            r#"{"task_name":"ClangTidyTask","project_file":"/p/app.vcxproj","command_line":"cl.exe /c b.cpp"}"#,
            "\n",
        );
        let mut session = in_memory_session();

        let stats = replay_events(
            Cursor::new(input),
            &TaskFilter::new(Some("Clang".to_string())),
            &mut session,
        )?;

        assert_eq!(
            stats,
            ReplayStats {
                events: 3,
                accepted: 2,
                malformed: 1,
            }
        );
        assert_eq!(session.stats().records, 2);
        Ok(())
    }

    #[test]
    fn test_replay_skips_lines_with_invalid_utf8() -> Result<()> {
        let mut input = Vec::new();
        input.extend_from_slice(compile_event("a.cpp").as_bytes());
        input.extend_from_slice(b"\n");
        input.extend_from_slice(
            b"{\"task_name\":\"CL\",\"project_file\":\"/p/x.vcxproj\",\"command_line\":\"cl.exe /c \xff.cpp\"}\n",
        );
        input.extend_from_slice(compile_event("c.cpp").as_bytes());

        let mut session = in_memory_session();
        let stats = replay_events(Cursor::new(input), &TaskFilter::default(), &mut session)?;

        assert_eq!(stats.events, 2);
        assert_eq!(stats.malformed, 1);
        assert_eq!(session.stats().records, 2);
        Ok(())
    }

    #[test]
    fn test_last_line_without_newline_is_read() -> Result<()> {
        let mut session = in_memory_session();
        let stats = replay_events(
            Cursor::new(compile_event("a.cpp")),
            &TaskFilter::default(),
            &mut session,
        )?;

        assert_eq!(stats.accepted, 1);
        Ok(())
    }

    /// Yields its data, then fails every later read.
    struct BrokenReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for BrokenReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(std::io::Error::other("connection reset")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_session_is_finalized_when_reading_fails() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let output_path = temp_dir.path().join("compile_commands.json");
        let config = Config {
            output_path: output_path.clone(),
            working_dir: Some(temp_dir.path().to_path_buf()),
            ..Config::default()
        };
        let reader = BufReader::new(BrokenReader {
            data: Cursor::new(format!("{}\n", compile_event("a.cpp")).into_bytes()),
        });

        let err = run_session(&config, reader).err().unwrap();
        assert!(matches!(err, Error::Io(_)));

        let records = load_records(&output_path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file, "a.cpp");
        Ok(())
    }
}
