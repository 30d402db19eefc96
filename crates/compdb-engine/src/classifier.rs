use compdb_types::{CompileCommandRecord, absolute_lexical_path};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::tokenizer::{tokenize, tokenize_spans};

/// File name searched for when the executable path cannot be tokenized.
pub const DEFAULT_EXECUTABLE_MARKER: &str = "cl.exe";

/// Options whose value is the following token.
pub const VALUE_FLAGS: &[&str] = &[
    "D",
    "I",
    "F",
    "U",
    "FI",
    "FU",
    "analyze:log",
    "analyze:stacksize",
    "analyze:max_paths",
    "analyze:ruleset",
    "analyze:plugin",
];

/// Extensions (case-insensitive) that make a bare token a source file.
pub const SOURCE_EXTENSIONS: &[&str] = &["c", "cxx", "cpp"];

/// How the compiler executable is found in a raw command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutableStrategy {
    /// Quoted lines use the first token, others try the marker first.
    #[default]
    Auto,
    /// The first token is the executable.
    LeadingToken,
    /// Everything up to and including the marker file name is the executable.
    Marker,
}

impl fmt::Display for ExecutableStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutableStrategy::Auto => write!(f, "auto"),
            ExecutableStrategy::LeadingToken => write!(f, "leading-token"),
            ExecutableStrategy::Marker => write!(f, "marker"),
        }
    }
}

impl FromStr for ExecutableStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ExecutableStrategy::Auto),
            "leading-token" => Ok(ExecutableStrategy::LeadingToken),
            "marker" => Ok(ExecutableStrategy::Marker),
            _ => Err(format!(
                "unknown executable strategy '{}' (expected auto, leading-token or marker)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierOptions {
    pub executable_marker: String,
    pub strategy: ExecutableStrategy,
    /// Base for relative compiler paths. Empty keeps them relative.
    pub working_dir: String,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            executable_marker: DEFAULT_EXECUTABLE_MARKER.to_string(),
            strategy: ExecutableStrategy::default(),
            working_dir: String::new(),
        }
    }
}

/// Result of classifying one compiler command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Canonical compiler executable path
    pub compiler_path: String,
    /// Argument text after the executable, verbatim
    pub arguments: String,
    pub source_files: Vec<String>,
}

impl Classification {
    /// Reconstructed invocation: quoted canonical compiler path plus the original arguments.
    pub fn command(&self) -> String {
        if self.arguments.is_empty() {
            format!("\"{}\"", self.compiler_path)
        } else {
            format!("\"{}\" {}", self.compiler_path, self.arguments)
        }
    }

    pub fn records(&self, directory: &str) -> Vec<CompileCommandRecord> {
        let command = self.command();
        self.source_files
            .iter()
            .map(|file| CompileCommandRecord::new(directory, command.clone(), file.clone()))
            .collect()
    }
}

struct LocatedExecutable<'a> {
    path: String,
    arguments: &'a str,
}

fn locate_by_leading_token(raw: &str) -> Result<Option<LocatedExecutable<'_>>> {
    let tokens = tokenize_spans(raw)?;
    let Some(first) = tokens.into_iter().next() else {
        return Ok(None);
    };
    if first.value.is_empty() {
        return Ok(None);
    }

    Ok(Some(LocatedExecutable {
        path: first.value,
        arguments: raw[first.end..].trim_start(),
    }))
}

fn locate_by_marker<'a>(raw: &'a str, marker: &str) -> Option<LocatedExecutable<'a>> {
    if marker.is_empty() {
        return None;
    }

    // ASCII lowering keeps byte offsets aligned with `raw`.
    let needle = format!("{} ", marker.to_ascii_lowercase());
    let at = raw.to_ascii_lowercase().find(&needle)?;
    let path_end = at + marker.len();

    let path = raw[..path_end].trim().trim_matches('"');
    if path.is_empty() {
        return None;
    }

    Some(LocatedExecutable {
        path: path.to_string(),
        arguments: raw[path_end + 1..].trim_start(),
    })
}

/// Byte offset of the first `/` or `-` option that follows a blank.
fn first_option_offset(raw: &str) -> Option<usize> {
    raw.match_indices([' ', '\t'])
        .map(|(idx, _)| idx + 1)
        .find(|&idx| raw[idx..].starts_with(['/', '-']))
}

/// A marker hit only names the executable if no option comes before it.
fn precedes_options(raw: &str, located: &LocatedExecutable<'_>) -> bool {
    let arguments_start = raw.len() - located.arguments.len();
    first_option_offset(raw).is_none_or(|option| arguments_start <= option)
}

fn locate_executable<'a>(
    raw: &'a str,
    options: &ClassifierOptions,
) -> Result<Option<LocatedExecutable<'a>>> {
    let marker = options.executable_marker.as_str();
    match options.strategy {
        ExecutableStrategy::LeadingToken => locate_by_leading_token(raw),
        ExecutableStrategy::Marker => Ok(locate_by_marker(raw, marker)),
        ExecutableStrategy::Auto => {
            if raw.trim_start().starts_with('"') {
                return locate_by_leading_token(raw);
            }
            match locate_by_marker(raw, marker) {
                Some(located) if precedes_options(raw, &located) => Ok(Some(located)),
                _ => locate_by_leading_token(raw),
            }
        }
    }
}

pub(crate) fn classify(raw: &str, options: &ClassifierOptions) -> Result<Classification> {
    let located = locate_executable(raw, options)?.ok_or_else(|| {
        Error::Classify(format!(
            "no compiler executable found (strategy: {}, marker: '{}') in command line: {}",
            options.strategy, options.executable_marker, raw
        ))
    })?;

    let tokens = tokenize(located.arguments)?;
    let source_files = scan_arguments(&tokens);

    Ok(Classification {
        compiler_path: absolute_lexical_path(&located.path, &options.working_dir),
        arguments: located.arguments.to_string(),
        source_files,
    })
}

fn has_source_extension(token: &str) -> bool {
    token.rsplit_once('.').is_some_and(|(_, ext)| {
        SOURCE_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    })
}

/// Pick the source files out of the compiler arguments (executable excluded).
///
/// Forced sources (`/Tc`, `/Tp`) come first in scan order, followed by bare
/// tokens that are sources by extension, or all bare tokens once `/TC` or
/// `/TP` was seen. Scanning stops at `/link`.
pub fn scan_arguments<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    let mut candidates: Vec<&str> = Vec::new();
    let mut all_inputs_are_sources = false;

    let mut iter = tokens.iter().map(AsRef::<str>::as_ref);
    while let Some(token) = iter.next() {
        if let Some(option) = token.strip_prefix(['/', '-']) {
            match option {
                "Tc" | "Tp" => {
                    if let Some(file) = iter.next() {
                        sources.push(file.to_string());
                    }
                }
                "TC" | "TP" => all_inputs_are_sources = true,
                "link" => break,
                flag if VALUE_FLAGS.contains(&flag) => {
                    iter.next();
                }
                inline if inline.starts_with("Tc") || inline.starts_with("Tp") => {
                    sources.push(inline[2..].to_string());
                }
                _ => {}
            }
        } else if !token.starts_with('@') {
            candidates.push(token);
        }
    }

    sources.extend(
        candidates
            .into_iter()
            .filter(|candidate| all_inputs_are_sources || has_source_extension(candidate))
            .map(str::to_string),
    );
    sources
}
