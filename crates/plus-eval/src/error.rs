//! Closed set of runtime (evaluation-time) errors.

use plus_util::{Diagnostic, SourceLocation};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("identifier '{name}' was used before it was declared")]
    UndeclaredIdentifier {
        name: String,
        location: SourceLocation,
    },

    #[error("identifier '{name}' was already declared")]
    RedeclaredIdentifier {
        name: String,
        location: SourceLocation,
    },

    #[error("loop count must not be negative, got {value}")]
    NegativeLoopCount {
        value: String,
        location: SourceLocation,
    },

    #[error("arithmetic overflowed the fixed-width integer representation")]
    BigIntOverflow { location: SourceLocation },
}

impl EvalError {
    fn loc(&self) -> &SourceLocation {
        match self {
            EvalError::UndeclaredIdentifier { location, .. }
            | EvalError::RedeclaredIdentifier { location, .. }
            | EvalError::NegativeLoopCount { location, .. }
            | EvalError::BigIntOverflow { location } => location,
        }
    }
}

impl Diagnostic for EvalError {
    fn location(&self) -> Option<&SourceLocation> {
        Some(self.loc())
    }

    fn kind(&self) -> &'static str {
        match self {
            EvalError::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            EvalError::RedeclaredIdentifier { .. } => "RedeclaredIdentifier",
            EvalError::NegativeLoopCount { .. } => "NegativeLoopCount",
            EvalError::BigIntOverflow { .. } => "BigIntOverflow",
        }
    }
}
