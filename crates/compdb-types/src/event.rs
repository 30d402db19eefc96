use serde::{Deserialize, Serialize};

use crate::util::parent_directory;

/// Task name the build tool reports for compiler invocations.
pub const COMPILER_TASK_NAME: &str = "CL";

/// Raw "task command line" notification as delivered by the build tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCommandLineEvent {
    pub task_name: String,
    pub project_file: String,
    pub command_line: String,
}

impl TaskCommandLineEvent {
    pub fn new(
        task_name: impl Into<String>,
        project_file: impl Into<String>,
        command_line: impl Into<String>,
    ) -> Self {
        Self {
            task_name: task_name.into(),
            project_file: project_file.into(),
            command_line: command_line.into(),
        }
    }
}

/// A compiler invocation accepted for recording.
///
/// Transient: built from one event, consumed once by the logger session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub task_name: String,
    pub project_directory: String,
    pub command_line: String,
}

impl Invocation {
    pub fn new(
        task_name: impl Into<String>,
        project_directory: impl Into<String>,
        command_line: impl Into<String>,
    ) -> Self {
        Self {
            task_name: task_name.into(),
            project_directory: project_directory.into(),
            command_line: command_line.into(),
        }
    }
}

impl From<&TaskCommandLineEvent> for Invocation {
    fn from(event: &TaskCommandLineEvent) -> Self {
        Self {
            task_name: event.task_name.clone(),
            project_directory: parent_directory(&event.project_file).to_string(),
            command_line: event.command_line.clone(),
        }
    }
}
