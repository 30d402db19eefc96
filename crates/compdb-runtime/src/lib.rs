pub mod config;
mod error;
pub mod filter;
pub mod replay;
pub mod session;

pub use config::{Config, DEFAULT_OUTPUT_PATH};
pub use error::{Error, Result};
pub use filter::TaskFilter;
pub use replay::{ReplayStats, replay_events, run_session};
pub use session::{LoggerSession, RecordOutcome, SessionReport, SessionStats};
