use clap::ValueEnum;
use compdb_engine::ExecutableStrategy;
use compdb_store::StoreMode;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ModeArg {
    Merge,
    Stream,
}

impl fmt::Display for ModeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeArg::Merge => write!(f, "merge"),
            ModeArg::Stream => write!(f, "stream"),
        }
    }
}

impl From<ModeArg> for StoreMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Merge => StoreMode::Merge,
            ModeArg::Stream => StoreMode::Stream,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum StrategyArg {
    Auto,
    LeadingToken,
    Marker,
}

impl fmt::Display for StrategyArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyArg::Auto => write!(f, "auto"),
            StrategyArg::LeadingToken => write!(f, "leading-token"),
            StrategyArg::Marker => write!(f, "marker"),
        }
    }
}

impl From<StrategyArg> for ExecutableStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => ExecutableStrategy::Auto,
            StrategyArg::LeadingToken => ExecutableStrategy::LeadingToken,
            StrategyArg::Marker => ExecutableStrategy::Marker,
        }
    }
}
