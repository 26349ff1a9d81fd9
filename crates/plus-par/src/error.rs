//! Closed error sets for grammar-table construction and parsing.

use plus_lex::TokenKind;
use plus_util::{Diagnostic, SourceLocation};
use thiserror::Error;

use crate::grammar::ProductionId;
use crate::item::StateId;

/// Raised while synthesizing the ACTION/GOTO tables from the canonical
/// LR(1) collection. [`crate::lr1`] builds strict canonical LR(1) states
/// (dedup by full item-set equality, lookaheads included — see its
/// module docs), so a conflict here means the shipped grammar itself is
/// not LR(1); the shipped PLUS grammar builds with zero conflicts, so in
/// practice this only fires if the grammar is edited.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error(
        "shift/reduce conflict in state {state:?} on '{terminal}': \
         shift to {shift:?} vs. reduce by production {reduce:?}"
    )]
    ShiftReduceConflict {
        state: StateId,
        terminal: &'static str,
        shift: StateId,
        reduce: ProductionId,
    },

    #[error(
        "reduce/reduce conflict in state {state:?} on '{terminal}': \
         production {first:?} vs. production {second:?}"
    )]
    ReduceReduceConflict {
        state: StateId,
        terminal: &'static str,
        first: ProductionId,
        second: ProductionId,
    },
}

impl Diagnostic for BuildError {
    fn location(&self) -> Option<&SourceLocation> {
        None
    }

    fn kind(&self) -> &'static str {
        match self {
            BuildError::ShiftReduceConflict { .. } => "ShiftReduceConflict",
            BuildError::ReduceReduceConflict { .. } => "ReduceReduceConflict",
        }
    }
}

/// Raised by the parser driver while consuming a token stream.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected token '{}' ({lexeme:?})", kind.display_name())]
    UnexpectedToken {
        kind: TokenKind,
        lexeme: String,
        location: SourceLocation,
    },
}

impl Diagnostic for ParseError {
    fn location(&self) -> Option<&SourceLocation> {
        match self {
            ParseError::UnexpectedToken { location, .. } => Some(location),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { .. } => "UnexpectedToken",
        }
    }
}
