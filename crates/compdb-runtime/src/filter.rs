use compdb_types::{COMPILER_TASK_NAME, Invocation, TaskCommandLineEvent};

/// Decides which task events are compiler invocations worth recording.
///
/// Sits in front of the session: only accepted events become `Invocation`s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    custom_marker: Option<String>,
}

impl TaskFilter {
    pub fn new(custom_marker: Option<String>) -> Self {
        Self {
            custom_marker: custom_marker.filter(|marker| !marker.is_empty()),
        }
    }

    pub fn accepts(&self, task_name: &str) -> bool {
        task_name == COMPILER_TASK_NAME
            || self
                .custom_marker
                .as_deref()
                .is_some_and(|marker| task_name.contains(marker))
    }

    pub fn select(&self, event: &TaskCommandLineEvent) -> Option<Invocation> {
        self.accepts(&event.task_name)
            .then(|| Invocation::from(event))
    }
}
