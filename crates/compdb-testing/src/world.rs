//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated temp directory per test
//! - Building an event log of compiler tasks
//! - Executing the CLI against that log

use anyhow::{Context, Result};
use assert_cmd::Command;
use compdb_types::{COMPILER_TASK_NAME, CompileCommandRecord, TaskCommandLineEvent};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const EVENTS_FILE: &str = "events.jsonl";
pub const DATABASE_FILE: &str = "compile_commands.json";

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use compdb_testing::TestWorld;
///
/// let world = TestWorld::new()
///     .with_compile("app.vcxproj", "cl.exe /c main.cpp");
///
/// let result = world.record(&[]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    event_lines: Vec<Vec<u8>>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            event_lines: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of a project file inside the world; its parent becomes the entry directory.
    pub fn project_file(&self, name: &str) -> String {
        self.root().join(name).to_string_lossy().to_string()
    }

    pub fn output_path(&self) -> PathBuf {
        self.root().join(DATABASE_FILE)
    }

    pub fn events_path(&self) -> PathBuf {
        self.root().join(EVENTS_FILE)
    }

    /// Queue an arbitrary task event.
    pub fn with_event(mut self, task_name: &str, project: &str, command_line: &str) -> Self {
        let event = TaskCommandLineEvent {
            task_name: task_name.to_string(),
            project_file: self.project_file(project),
            command_line: command_line.to_string(),
        };
        let line = serde_json::to_vec(&event).expect("Failed to encode event");
        self.event_lines.push(line);
        self
    }

    /// Queue a raw line verbatim, e.g. one that is not valid JSON or UTF-8.
    pub fn with_raw_line(mut self, line: &[u8]) -> Self {
        self.event_lines.push(line.to_vec());
        self
    }

    /// Queue a compiler task event.
    pub fn with_compile(self, project: &str, command_line: &str) -> Self {
        self.with_event(COMPILER_TASK_NAME, project, command_line)
    }

    /// Drop queued events so the world can replay a second build.
    pub fn clear_events(&mut self) {
        self.event_lines.clear();
    }

    /// Write queued events as JSON Lines and return the file path.
    pub fn write_events(&self) -> Result<PathBuf> {
        let mut contents = Vec::new();
        for line in &self.event_lines {
            contents.extend_from_slice(line);
            contents.push(b'\n');
        }
        let path = self.events_path();
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write events to {}", path.display()))?;
        Ok(path)
    }

    /// Replay queued events through `compdb record`, writing to the world's database.
    ///
    /// `extra` is appended after `--events` and `--output`.
    pub fn record(&self, extra: &[&str]) -> Result<CliResult> {
        let events = self.write_events()?;
        let events = events.to_string_lossy().to_string();
        let output = self.output_path().to_string_lossy().to_string();

        let mut args = vec!["record", "--events", events.as_str(), "--output", output.as_str()];
        args.extend_from_slice(extra);
        self.run(&args)
    }

    /// Execute the CLI with the world root as working directory.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("compdb")
            .map_err(|e| anyhow::anyhow!("Failed to find compdb binary: {}", e))?;

        cmd.current_dir(self.root());
        cmd.env_remove("RUST_LOG");
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Parse the world's database file.
    pub fn read_database(&self) -> Result<Vec<CompileCommandRecord>> {
        let path = self.output_path();
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn read_database_text(&self) -> Result<String> {
        Ok(std::fs::read_to_string(self.output_path())?)
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
