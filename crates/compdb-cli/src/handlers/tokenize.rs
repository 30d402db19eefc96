use anyhow::Result;
use compdb_engine::tokenize;

pub fn handle(command_line: &str) -> Result<()> {
    let tokens = tokenize(command_line)?;
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}
