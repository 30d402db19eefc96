//! Tracing subscriber setup for the compdb binary.
//!
//! Logs go to stderr so stdout stays clean for JSON output.

use crate::types::LogLevel;
use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, util::SubscriberInitExt};

/// Build the effective filter, honoring RUST_LOG if set.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    if std::env::var_os("RUST_LOG").is_some()
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(level.to_string())
}

pub fn init_logging(level: LogLevel) -> Result<()> {
    let subscriber = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter(level))
        .compact()
        .finish();

    if let Err(err) = subscriber.try_init() {
        // Tests may initialize more than once in the same process.
        if err.to_string().contains("already") {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}
