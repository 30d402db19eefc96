// NOTE: compdb Architecture Rationale
//
// Why replay recorded events (not hook the build tool directly)?
// - The build tool's notification plumbing is platform specific; a JSON Lines
//   event log keeps the core testable anywhere
// - The same session code runs for live capture and for replaying old logs
//
// Why merge by default?
// - A crash mid-build leaves the previous database untouched
// - Incremental builds only compile a subset; merging keeps the rest
// - Trade-off: entries for deleted sources linger until the file is removed
//
// Why skip (not abort on) bad invocations?
// - One odd command line must not cost the whole database

mod args;
mod commands;
mod handlers;
mod logging;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::{exit_code, run};
