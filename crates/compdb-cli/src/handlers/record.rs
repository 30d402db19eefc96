use crate::types::ModeArg;
use anyhow::{Context, Result};
use compdb_runtime::{Config, run_session};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

pub struct RecordArgs {
    pub events: Option<PathBuf>,
    pub parameters: Option<String>,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub mode: Option<ModeArg>,
}

fn resolve_config(args: &RecordArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };

    if let Some(parameters) = &args.parameters {
        config.apply_parameters(parameters)?;
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }

    Ok(config)
}

pub fn handle(args: RecordArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    // Open the input before the session so a bad path never truncates the output.
    let reader: Box<dyn BufRead> = match &args.events {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open event file: {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(std::io::stdin().lock()),
    };

    let (replay, report) = run_session(&config, reader)?;

    println!(
        "{} events, {} accepted, {} skipped, {} without sources, {} malformed",
        replay.events,
        replay.accepted,
        report.stats.skipped,
        report.stats.without_sources,
        replay.malformed
    );
    println!(
        "Wrote {} entries to {} ({})",
        report.store.records,
        config.output_path.display(),
        config.mode
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use compdb_store::StoreMode;

    fn args() -> RecordArgs {
        RecordArgs {
            events: None,
            parameters: None,
            config: None,
            output: None,
            mode: None,
        }
    }

    #[test]
    fn test_flags_override_parameters() -> Result<()> {
        let config = resolve_config(&RecordArgs {
            parameters: Some("path:from-params.json;mode:stream".to_string()),
            output: Some(PathBuf::from("from-flag.json")),
            mode: Some(ModeArg::Merge),
            ..args()
        })?;

        assert_eq!(config.output_path, PathBuf::from("from-flag.json"));
        assert_eq!(config.mode, StoreMode::Merge);
        Ok(())
    }

    #[test]
    fn test_bad_parameter_fails() {
        let result = resolve_config(&RecordArgs {
            parameters: Some("verbosity:high".to_string()),
            ..args()
        });
        assert!(result.is_err());
    }
}
