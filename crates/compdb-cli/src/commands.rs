use super::args::{Cli, Commands};
use super::handlers;
use super::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init_logging(cli.log_level)?;

    match cli.command {
        Commands::Record {
            events,
            parameters,
            config,
            output,
            mode,
        } => handlers::record::handle(handlers::record::RecordArgs {
            events,
            parameters,
            config,
            output,
            mode,
        }),

        Commands::Classify {
            command_line,
            marker,
            strategy,
            working_dir,
        } => handlers::classify::handle(&command_line, marker, strategy.into(), working_dir),

        Commands::Tokenize { command_line } => handlers::tokenize::handle(&command_line),
    }
}

/// Process exit code for a failed run.
///
/// 2: configuration, 3: output cannot be opened, 4: database write failed, 1: anything else.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(runtime_err) = cause.downcast_ref::<compdb_runtime::Error>() {
            match runtime_err {
                compdb_runtime::Error::Config(_) => return 2,
                compdb_runtime::Error::Store(store_err) => return store_exit_code(store_err),
                compdb_runtime::Error::Io(_) => {}
            }
        }
        if let Some(store_err) = cause.downcast_ref::<compdb_store::Error>() {
            return store_exit_code(store_err);
        }
    }
    1
}

fn store_exit_code(err: &compdb_store::Error) -> i32 {
    match err {
        compdb_store::Error::OutputOpen { .. } => 3,
        compdb_store::Error::Write { .. } | compdb_store::Error::Serialize(_) => 4,
    }
}
