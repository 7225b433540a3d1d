//! Parse failures.
//!
//! The grammar has no recovery: the first failure aborts the parse and is
//! returned to the caller. Events fired before it are not retracted.

use thiserror::Error;

use crate::tokenizer::Token;

/// A failure raised by the grammar parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A required token kind was absent, or a hex color had the wrong shape.
    #[error("Unexpected token '{value}' at line {line}, char {column}.")]
    UnexpectedToken {
        /// Source text of the offending token (empty at end of input).
        value: String,
        /// 1-based line of the offending token.
        line: usize,
        /// 1-based column of the offending token.
        column: usize,
    },
}

impl ParseError {
    /// Build an unexpected-token failure pointing at `token`.
    #[must_use]
    pub fn unexpected(token: &Token) -> Self {
        Self::UnexpectedToken {
            value: token.value.clone(),
            line: token.start_row,
            column: token.start_col,
        }
    }

    /// The `(line, column)` the failure refers to.
    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        match self {
            Self::UnexpectedToken { line, column, .. } => (*line, *column),
        }
    }

    /// Source text of the offending token.
    #[must_use]
    pub fn token_value(&self) -> &str {
        match self {
            Self::UnexpectedToken { value, .. } => value,
        }
    }
}
