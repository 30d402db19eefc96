use anyhow::{Context, Result};
use compdb_engine::{ClassifierOptions, ExecutableStrategy, classify};
use std::path::PathBuf;

pub fn handle(
    command_line: &str,
    marker: String,
    strategy: ExecutableStrategy,
    working_dir: Option<PathBuf>,
) -> Result<()> {
    let working_dir = match working_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let options = ClassifierOptions {
        executable_marker: marker,
        strategy,
        working_dir: working_dir.to_string_lossy().into_owned(),
    };

    let classification = classify(command_line, &options)?;
    let mut value = serde_json::to_value(&classification)?;
    value["command"] = serde_json::Value::String(classification.command());

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
