//! Error types for parsing and compiling windowgrams.

use thiserror::Error;

/// A windowgram could not be turned into panes.
///
/// `line` is the 1-based row that failed, or `0` when the input was empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (line {line})")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

/// A windowgram cannot be reproduced by binary splits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("windowgram is malformed: {0}")]
    Parse(#[from] ParseError),
    #[error("panes {first} and {second} overlap; layered windowgrams cannot be split")]
    Layered { first: char, second: char },
    #[error("windowgram is tiled; {unlinked} split(s) could not be assigned to a pane")]
    Tiled { unlinked: usize },
    #[error("windowgram has no panes")]
    Empty,
}
