// Engine module - pure processing logic (tokenize, classify)
// Sits between raw task events (types) and the database store.

mod classifier;
pub mod error;
mod tokenizer;

pub use classifier::{
    Classification, ClassifierOptions, DEFAULT_EXECUTABLE_MARKER, ExecutableStrategy,
    SOURCE_EXTENSIONS, VALUE_FLAGS, scan_arguments,
};
pub use error::{Error, Result};
pub use tokenizer::{Token, TokenizeError, tokenize, tokenize_spans};

use compdb_types::{CompileCommandRecord, Invocation};

// Façade API - stable interface for the runtime layer

/// Classify a raw compiler command line
pub fn classify(command_line: &str, options: &ClassifierOptions) -> Result<Classification> {
    classifier::classify(command_line, options)
}

/// Turn one invocation into compilation-database records, one per source file
pub fn records_for(
    invocation: &Invocation,
    options: &ClassifierOptions,
) -> Result<Vec<CompileCommandRecord>> {
    let classification = classify(&invocation.command_line, options)?;
    Ok(classification.records(&invocation.project_directory))
}
