use thiserror::Error;

/// Failure to recognize the structure of a source file.
///
/// The analyzer expects syntactically valid input; these errors mean the host
/// handed over a file it should not have (or one mid-edit), so analysis of that
/// file is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unterminated {what} starting at offset {offset}")]
    Unterminated { what: &'static str, offset: usize },

    #[error("unexpected end of file at offset {offset}: expected {expected}")]
    UnexpectedEof {
        expected: &'static str,
        offset: usize,
    },

    #[error("expected {expected} at offset {offset}, found '{found}'")]
    Expected {
        expected: &'static str,
        found: String,
        offset: usize,
    },

    #[error("unbalanced '{delimiter}' at offset {offset}")]
    Unbalanced { delimiter: String, offset: usize },
}

impl ParseError {
    /// Byte offset the error points at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Unterminated { offset, .. }
            | Self::UnexpectedEof { offset, .. }
            | Self::Expected { offset, .. }
            | Self::Unbalanced { offset, .. } => *offset,
        }
    }
}
