use crate::types::{LogLevel, ModeArg, StrategyArg};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compdb")]
#[command(about = "Build compile_commands.json from compiler task events", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay task events (JSON Lines) into a compilation database
    Record {
        #[arg(long, help = "Event file to read (defaults to stdin)")]
        events: Option<PathBuf>,

        #[arg(
            long,
            short = 'p',
            help = "Logger parameters, e.g. \"path:out.json;task:Clang;mode:stream\""
        )]
        parameters: Option<String>,

        #[arg(long, help = "TOML configuration file")]
        config: Option<PathBuf>,

        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        #[arg(long)]
        mode: Option<ModeArg>,
    },

    /// Show how one compiler command line is classified
    Classify {
        #[arg(allow_hyphen_values = true)]
        command_line: String,

        #[arg(long, default_value = "cl.exe")]
        marker: String,

        #[arg(long, default_value = "auto")]
        strategy: StrategyArg,

        #[arg(long, help = "Base directory for relative compiler paths")]
        working_dir: Option<PathBuf>,
    },

    /// Split a command line into arguments
    Tokenize {
        #[arg(allow_hyphen_values = true)]
        command_line: String,
    },
}
