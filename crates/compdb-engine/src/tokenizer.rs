//! Command-line tokenizer following the Windows argv conventions.
//!
//! Rules:
//! - blanks (space, tab, CR, LF) separate tokens outside quotes
//! - `"` toggles quoting; `""` inside quotes is a literal quote
//! - `2n` backslashes before `"` give `n` backslashes and a delimiting quote
//! - `2n+1` backslashes before `"` give `n` backslashes and a literal quote
//! - backslashes anywhere else are literal
//!
//! The first token gets no special treatment; callers decide what it means.

use std::fmt;

/// A token together with the byte range it occupied in the raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    /// Byte offset of the first character of the token.
    pub start: usize,
    /// Byte offset just past the last character of the token.
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// The command line contains a NUL character, which no argv splitter accepts.
    EmbeddedNul { offset: usize },
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::EmbeddedNul { offset } => {
                write!(f, "command line contains a NUL character at byte {}", offset)
            }
        }
    }
}

impl std::error::Error for TokenizeError {}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Split a raw command line into argument strings.
pub fn tokenize(raw: &str) -> Result<Vec<String>, TokenizeError> {
    Ok(tokenize_spans(raw)?
        .into_iter()
        .map(|token| token.value)
        .collect())
}

/// Split a raw command line, keeping the source span of every token.
pub fn tokenize_spans(raw: &str) -> Result<Vec<Token>, TokenizeError> {
    if let Some(offset) = raw.find('\0') {
        return Err(TokenizeError::EmbeddedNul { offset });
    }

    let mut tokens = Vec::new();
    let mut chars = raw.char_indices().peekable();
    let mut current = String::new();
    let mut start: Option<usize> = None;
    let mut in_quotes = false;

    while let Some((idx, c)) = chars.next() {
        match c {
            c if is_blank(c) && !in_quotes => {
                if let Some(token_start) = start.take() {
                    tokens.push(Token {
                        value: std::mem::take(&mut current),
                        start: token_start,
                        end: idx,
                    });
                }
            }
            '\\' => {
                start.get_or_insert(idx);
                let mut run = 1;
                while chars.next_if(|&(_, next)| next == '\\').is_some() {
                    run += 1;
                }

                if chars.peek().is_some_and(|&(_, next)| next == '"') {
                    current.push_str(&"\\".repeat(run / 2));
                    if run % 2 == 1 {
                        chars.next();
                        current.push('"');
                    }
                    // Even run: the quote is handled as a delimiter on the next turn.
                } else {
                    current.push_str(&"\\".repeat(run));
                }
            }
            '"' => {
                start.get_or_insert(idx);
                if in_quotes && chars.peek().is_some_and(|&(_, next)| next == '"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = !in_quotes;
                }
            }
            other => {
                start.get_or_insert(idx);
                current.push(other);
            }
        }
    }

    if let Some(token_start) = start {
        tokens.push(Token {
            value: current,
            start: token_start,
            end: raw.len(),
        });
    }

    Ok(tokens)
}
