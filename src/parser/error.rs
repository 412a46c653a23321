//! Parse-time error type.

use thiserror::Error;

/// A parse failure: the source line and the byte offset of the first
/// unrecognized character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error in position {position}: {line}")]
pub struct SyntaxError {
    /// The original input line.
    pub line: String,
    /// Byte offset where recognition stopped.
    pub position: usize,
}

impl SyntaxError {
    pub fn new(line: impl Into<String>, position: usize) -> Self {
        Self {
            line: line.into(),
            position,
        }
    }
}
