use std::fmt;
use std::path::PathBuf;

/// Result type for compdb-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Store failures that end a session
#[derive(Debug)]
pub enum Error {
    /// The output path cannot be created or written at startup
    OutputOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing the database failed part-way (disk full, permissions revoked, ...)
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A record could not be encoded as JSON
    Serialize(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutputOpen { path, source } => {
                write!(f, "Cannot open output file {}: {}", path.display(), source)
            }
            Error::Write { path, source } => {
                write!(f, "Failed to write database {}: {}", path.display(), source)
            }
            Error::Serialize(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OutputOpen { source, .. } | Error::Write { source, .. } => Some(source),
            Error::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err)
    }
}

/// An existing database could not be loaded.
///
/// Never fatal: the merging store starts from an empty database instead.
#[derive(Debug)]
pub enum LoadError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Read { path, source } => {
                write!(f, "Cannot read database {}: {}", path.display(), source)
            }
            LoadError::Parse { path, source } => write!(
                f,
                "Database {} is not a JSON array of compile commands: {}",
                path.display(),
                source
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Read { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
        }
    }
}
