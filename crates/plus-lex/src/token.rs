//! Token and payload types produced by the lexer.

use plus_util::{BigInt, SourceLocation};

use crate::symbol::SymbolId;

/// Closed set of terminal kinds. Terminal ids used by the grammar coincide
/// with the discriminant order of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Write,
    And,
    Repeat,
    Newline,
    Times,
    NumberKw,

    // Identifiers and literals
    Identifier,
    IntegerLiteral,
    StringLiteral,

    // Punctuation
    Semicolon,
    Assign,      // :=
    PlusAssign,  // +=
    MinusAssign, // -=
    LBrace,
    RBrace,
    LParen,
    RParen,
    Plus, // bare '+'
    Star, // bare '*'

    Eof,
}

impl TokenKind {
    /// Display name used in diagnostics and ACTION-table debug dumps.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Write => "write",
            TokenKind::And => "and",
            TokenKind::Repeat => "repeat",
            TokenKind::Newline => "newline",
            TokenKind::Times => "times",
            TokenKind::NumberKw => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerLiteral => "integer",
            TokenKind::StringLiteral => "string",
            TokenKind::Semicolon => ";",
            TokenKind::Assign => ":=",
            TokenKind::PlusAssign => "+=",
            TokenKind::MinusAssign => "-=",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Plus => "+",
            TokenKind::Star => "*",
            TokenKind::Eof => "$",
        }
    }
}

/// Payload carried by data-bearing token kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenPayload {
    None,
    Symbol(SymbolId),
    Integer(BigInt),
    /// A string literal's lexeme, quotes included (stripped by the parser
    /// driver when it materializes a `StringLiteral` AST node).
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
    pub payload: TokenPayload,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
            payload: TokenPayload::None,
        }
    }

    pub fn with_payload(mut self, payload: TokenPayload) -> Self {
        self.payload = payload;
        self
    }
}
