//! plus-lex - Lexical Analyzer
//!
//! Transforms PLUS source text into a finite token sequence ending in EOF
//! (or halting on the first lexical error). The lexer is a
//! character-classified finite-state machine: every byte is mapped to one
//! of a fixed set of classes, and the FSM dispatches on class rather than
//! on individual byte values. See [`lexer`] for the state diagram.

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod symbol;
pub mod token;

pub use error::LexError;
pub use lexer::Lexer;
pub use symbol::{SymbolEntry, SymbolId, SymbolTable};
pub use token::{Token, TokenKind, TokenPayload};
