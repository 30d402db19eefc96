//! Custom assertions for compilation database validation.

use anyhow::{Context, Result};
use compdb_types::CompileCommandRecord;
use std::collections::HashSet;

/// Find the record for `file`, failing with the list of known files otherwise.
pub fn find_entry<'a>(
    records: &'a [CompileCommandRecord],
    file: &str,
) -> Result<&'a CompileCommandRecord> {
    records
        .iter()
        .find(|record| record.file == file)
        .with_context(|| {
            let known: Vec<&str> = records.iter().map(|r| r.file.as_str()).collect();
            format!("No entry for '{}' (entries: {:?})", file, known)
        })
}

/// Assert that every file appears at most once.
pub fn assert_unique_files(records: &[CompileCommandRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.file.as_str()) {
            anyhow::bail!("Duplicate entry for '{}'", record.file);
        }
    }
    Ok(())
}

/// Assert the exact list of files, in order.
pub fn assert_files(records: &[CompileCommandRecord], expected: &[&str]) -> Result<()> {
    let actual: Vec<&str> = records.iter().map(|r| r.file.as_str()).collect();
    if actual != expected {
        anyhow::bail!("Expected files {:?}, got {:?}", expected, actual);
    }
    Ok(())
}
