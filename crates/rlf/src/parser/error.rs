//! Parse error types for RLF.

use thiserror::Error;

/// An error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error(
        "syntax error at {line}:{column}{}: {message}",
        .definition.as_deref().map(|d| format!(" in '{d}'")).unwrap_or_default()
    )]
    Syntax {
        /// Name of the definition being parsed, when one had started.
        definition: Option<String>,
        /// Byte offset into the source text.
        offset: usize,
        line: usize,
        column: usize,
        message: String,
    },
}

impl ParseError {
    /// Build a syntax error positioned at the start of `remaining`.
    pub(crate) fn at(
        original: &str,
        remaining: &str,
        definition: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        let offset = original.len() - remaining.len();
        let (line, column) = line_column(original, offset);
        ParseError::Syntax {
            definition,
            offset,
            line,
            column,
            message: message.into(),
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            ParseError::Syntax { offset, .. } => *offset,
        }
    }

    pub fn definition(&self) -> Option<&str> {
        match self {
            ParseError::Syntax { definition, .. } => definition.as_deref(),
        }
    }
}

/// 1-based line and column of a byte offset.
pub(crate) fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let consumed = &source[..offset];
    let line = consumed.matches('\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(pos) => consumed[pos + 1..].chars().count() + 1,
        None => consumed.chars().count() + 1,
    };
    (line, column)
}
