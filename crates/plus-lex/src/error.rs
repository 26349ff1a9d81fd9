//! Closed set of lexical and literal-conversion errors.

use plus_util::{BigIntError, Diagnostic, SourceLocation};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    #[error("unknown character '{c}'", c = *byte as char)]
    UnknownCharacter { byte: u8, location: SourceLocation },

    #[error("unterminated string literal")]
    UnterminatedString { location: SourceLocation },

    #[error("unterminated comment")]
    UnterminatedComment { location: SourceLocation },

    #[error("lexeme exceeds the 256-byte buffer")]
    LexemeTooLong { location: SourceLocation },

    #[error("integer literal exceeds 100 digits")]
    IntegerLiteralTooLong { location: SourceLocation },

    #[error("bare '{c}' is not a valid operator", c = *byte as char)]
    InvalidOperator { byte: u8, location: SourceLocation },

    #[error("{source}")]
    InvalidLiteral {
        #[source]
        source: BigIntError,
        location: SourceLocation,
    },

    #[error("{source}")]
    Overflow {
        #[source]
        source: BigIntError,
        location: SourceLocation,
    },
}

impl LexError {
    fn loc(&self) -> &SourceLocation {
        match self {
            LexError::UnknownCharacter { location, .. }
            | LexError::UnterminatedString { location }
            | LexError::UnterminatedComment { location }
            | LexError::LexemeTooLong { location }
            | LexError::IntegerLiteralTooLong { location }
            | LexError::InvalidOperator { location, .. }
            | LexError::InvalidLiteral { location, .. }
            | LexError::Overflow { location, .. } => location,
        }
    }
}

impl Diagnostic for LexError {
    fn location(&self) -> Option<&SourceLocation> {
        Some(self.loc())
    }

    fn kind(&self) -> &'static str {
        match self {
            LexError::UnknownCharacter { .. } => "UnknownCharacter",
            LexError::UnterminatedString { .. } => "UnterminatedString",
            LexError::UnterminatedComment { .. } => "UnterminatedComment",
            LexError::LexemeTooLong { .. } => "LexemeTooLong",
            LexError::IntegerLiteralTooLong { .. } => "IntegerLiteralTooLong",
            LexError::InvalidOperator { .. } => "InvalidOperator",
            LexError::InvalidLiteral { .. } => "InvalidLiteral",
            LexError::Overflow { .. } => "Overflow",
        }
    }
}
