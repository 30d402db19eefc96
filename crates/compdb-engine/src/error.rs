use std::fmt;

use crate::tokenizer::TokenizeError;

/// Result type for compdb-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Per-invocation failures. None of these should end a logger session.
#[derive(Debug)]
pub enum Error {
    /// The command line could not be split into arguments
    Tokenize(TokenizeError),

    /// No compiler executable could be located in the command line
    Classify(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Tokenize(err) => write!(f, "Tokenization error: {}", err),
            Error::Classify(msg) => write!(f, "Classification error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Tokenize(err) => Some(err),
            Error::Classify(_) => None,
        }
    }
}

impl From<TokenizeError> for Error {
    fn from(err: TokenizeError) -> Self {
        Error::Tokenize(err)
    }
}
