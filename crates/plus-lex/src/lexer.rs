//! Table-driven lexer: a character-classified finite-state machine that
//! turns a byte stream into a token sequence.
//!
//! ============================================================================
//! CHARACTER CLASSIFICATION
//! ============================================================================
//!
//! Every byte maps to exactly one of a fixed, closed set of classes. The
//! FSM below dispatches on class, not on the raw byte, which is what makes
//! it "table-driven" in spirit even though the table here is a `match`
//! rather than a literal 2D array: both encode the same total function
//! `byte -> class`, and swapping one representation for the other changes
//! nothing about the states or transitions.
//!
//! ```text
//! Start ──alpha──▶ Identifier ──(alpha|digit)*, else push back──▶ emit
//! Start ──digit──▶ Integer    ──digit*, else push back──▶ emit
//! Start ──'+'────▶ Plus       ──'='──▶ emit PlusAssign
//!                              └─else, push back──▶ emit Plus
//! Start ──':'────▶ Colon      ──'='──▶ emit Assign
//!                              └─else──▶ error InvalidOperator
//! Start ──'-'────▶ Dash       ──'='──▶ emit MinusAssign
//!                              ├─digit──▶ Integer (negative literal)
//!                              └─else──▶ error InvalidOperator
//! Start ──'"'────▶ String     ──until matching '"'──▶ emit StringLiteral
//! Start ──{;{}()}*────────────────────────────────▶ emit single-byte token
//! ```
//!
//! `**` comment pairs and whitespace are consumed before a token's start
//! location is recorded, so they never reach the dispatch above.

use std::rc::Rc;

use plus_util::{BigIntError, SourceLocation};

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::symbol::SymbolTable;
use crate::token::{Token, TokenKind, TokenPayload};

/// Tokens and identifiers are capped at this many bytes; exceeding it is
/// [`LexError::LexemeTooLong`].
const MAX_LEXEME_LEN: usize = 256;

/// Integer literals are additionally capped at this many digits (on top
/// of the byte-length cap above).
const MAX_INTEGER_DIGITS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Alpha,
    Digit,
    Plus,
    Equals,
    Colon,
    Dash,
    Quote,
    Star,
    Whitespace,
    Semicolon,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    Other,
}

fn classify(byte: u8) -> CharClass {
    match byte {
        b'a'..=b'z' | b'A'..=b'Z' | b'_' => CharClass::Alpha,
        b'0'..=b'9' => CharClass::Digit,
        b'+' => CharClass::Plus,
        b'=' => CharClass::Equals,
        b':' => CharClass::Colon,
        b'-' => CharClass::Dash,
        b'"' => CharClass::Quote,
        b'*' => CharClass::Star,
        b' ' | b'\t' | b'\r' | b'\n' => CharClass::Whitespace,
        b';' => CharClass::Semicolon,
        b'{' => CharClass::OpenBrace,
        b'}' => CharClass::CloseBrace,
        b'(' => CharClass::OpenParen,
        b')' => CharClass::CloseParen,
        _ => CharClass::Other,
    }
}

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    source_name: Rc<str>,
    symbols: SymbolTable,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, source_name: impl Into<Rc<str>>) -> Self {
        Self {
            cursor: Cursor::new(source.as_bytes()),
            source_name: source_name.into(),
            symbols: SymbolTable::new(),
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    fn here(&self) -> SourceLocation {
        SourceLocation::new(self.cursor.line(), self.cursor.column(), self.source_name.clone())
    }

    /// Skips whitespace and `**`-delimited comments. On return the cursor
    /// sits at the first byte of the next token (or at EOF).
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.cursor.current() {
                Some(b) if classify(b) == CharClass::Whitespace => {
                    self.cursor.advance();
                }
                Some(b'*') if self.cursor.peek_at(1) == Some(b'*') => {
                    let start = self.here();
                    self.cursor.advance();
                    self.cursor.advance();
                    self.skip_comment_body(start)?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment_body(&mut self, start: SourceLocation) -> Result<(), LexError> {
        loop {
            match self.cursor.current() {
                None => return Err(LexError::UnterminatedComment { location: start }),
                Some(b'*') if self.cursor.peek_at(1) == Some(b'*') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    return Ok(());
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Returns the next token, or the first lexical error encountered.
    /// After an error, the lexer must not be called again — there is no
    /// local recovery.
    ///
    /// Emits a `tracing::debug!` trace of the token's kind, lexeme, and
    /// location on every successful scan, gated like all `tracing` output
    /// behind whatever filter the caller installs (`plus-drv`'s `-v` flag
    /// raises it to `debug`; it is silent by default).
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let token = self.scan_next_token()?;
        tracing::debug!(
            kind = ?token.kind,
            lexeme = %token.lexeme,
            location = %token.location,
            "lexed token"
        );
        Ok(token)
    }

    fn scan_next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;
        let start = self.here();

        let Some(byte) = self.cursor.current() else {
            return Ok(Token::new(TokenKind::Eof, "", start));
        };

        match classify(byte) {
            CharClass::Alpha => self.scan_identifier(start),
            CharClass::Digit => self.scan_integer(start, false),
            CharClass::Plus => self.scan_plus(start),
            CharClass::Colon => self.scan_colon(start),
            CharClass::Dash => self.scan_dash(start),
            CharClass::Quote => self.scan_string(start),
            CharClass::Semicolon => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Semicolon, ";", start))
            }
            CharClass::OpenBrace => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::LBrace, "{", start))
            }
            CharClass::CloseBrace => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::RBrace, "}", start))
            }
            CharClass::OpenParen => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::LParen, "(", start))
            }
            CharClass::CloseParen => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::RParen, ")", start))
            }
            CharClass::Star => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Star, "*", start))
            }
            CharClass::Whitespace => unreachable!("trivia already skipped"),
            CharClass::Equals | CharClass::Other => {
                self.cursor.advance();
                Err(LexError::UnknownCharacter {
                    byte,
                    location: start,
                })
            }
        }
    }

    fn scan_identifier(&mut self, start: SourceLocation) -> Result<Token, LexError> {
        let mut lexeme = String::new();
        loop {
            let byte = self.cursor.advance().expect("at least one alpha byte");
            lexeme.push(byte as char);
            if lexeme.len() > MAX_LEXEME_LEN {
                return Err(LexError::LexemeTooLong { location: start });
            }
            match self.cursor.current() {
                Some(b) if matches!(classify(b), CharClass::Alpha | CharClass::Digit) => continue,
                _ => break,
            }
        }

        let (id, keyword_kind) = self.symbols.intern(&lexeme);
        match keyword_kind {
            Some(kind) => Ok(Token::new(kind, lexeme, start)),
            None => Ok(Token::new(TokenKind::Identifier, lexeme, start)
                .with_payload(TokenPayload::Symbol(id))),
        }
    }

    /// Scans a run of digits. `negative` is true when a leading `-` (the
    /// Dash-state transition into a negative literal) has already been
    /// consumed by the caller but not yet appended to `lexeme`.
    fn scan_integer(&mut self, start: SourceLocation, negative: bool) -> Result<Token, LexError> {
        let mut lexeme = String::new();
        if negative {
            lexeme.push('-');
        }
        let mut digit_count = 0usize;
        loop {
            let byte = self.cursor.advance().expect("at least one digit byte");
            lexeme.push(byte as char);
            digit_count += 1;
            if lexeme.len() > MAX_LEXEME_LEN {
                return Err(LexError::LexemeTooLong { location: start });
            }
            if digit_count > MAX_INTEGER_DIGITS {
                return Err(LexError::IntegerLiteralTooLong { location: start });
            }
            match self.cursor.current() {
                Some(b) if classify(b) == CharClass::Digit => continue,
                _ => break,
            }
        }

        let value = plus_util::BigInt::from_decimal_str(&lexeme).map_err(|e| match e {
            BigIntError::Overflow => LexError::Overflow {
                source: e,
                location: start.clone(),
            },
            BigIntError::InvalidLiteral { .. } => LexError::InvalidLiteral {
                source: e,
                location: start.clone(),
            },
        })?;

        Ok(Token::new(TokenKind::IntegerLiteral, lexeme, start)
            .with_payload(TokenPayload::Integer(value)))
    }

    fn scan_plus(&mut self, start: SourceLocation) -> Result<Token, LexError> {
        self.cursor.advance(); // consume '+'
        if self.cursor.current() == Some(b'=') {
            self.cursor.advance();
            Ok(Token::new(TokenKind::PlusAssign, "+=", start))
        } else {
            Ok(Token::new(TokenKind::Plus, "+", start))
        }
    }

    fn scan_colon(&mut self, start: SourceLocation) -> Result<Token, LexError> {
        self.cursor.advance(); // consume ':'
        if self.cursor.current() == Some(b'=') {
            self.cursor.advance();
            Ok(Token::new(TokenKind::Assign, ":=", start))
        } else {
            Err(LexError::InvalidOperator {
                byte: b':',
                location: start,
            })
        }
    }

    fn scan_dash(&mut self, start: SourceLocation) -> Result<Token, LexError> {
        self.cursor.advance(); // consume '-'
        match self.cursor.current() {
            Some(b'=') => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::MinusAssign, "-=", start))
            }
            Some(b) if classify(b) == CharClass::Digit => self.scan_integer(start, true),
            _ => Err(LexError::InvalidOperator {
                byte: b'-',
                location: start,
            }),
        }
    }

    fn scan_string(&mut self, start: SourceLocation) -> Result<Token, LexError> {
        let mut lexeme = String::new();
        lexeme.push('"');
        self.cursor.advance(); // consume opening quote
        loop {
            match self.cursor.advance() {
                None => return Err(LexError::UnterminatedString { location: start }),
                Some(b'"') => {
                    lexeme.push('"');
                    break;
                }
                Some(byte) => {
                    lexeme.push(byte as char);
                    if lexeme.len() > MAX_LEXEME_LEN {
                        return Err(LexError::LexemeTooLong { location: start });
                    }
                }
            }
        }
        Ok(Token::new(TokenKind::StringLiteral, lexeme.clone(), start)
            .with_payload(TokenPayload::Text(lexeme)))
    }

    /// Tokenizes the entire source, stopping at the first error or EOF.
    /// The EOF token (if reached cleanly) is included as the last element.
    /// Takes `&mut self` (rather than consuming the lexer) so that
    /// [`Lexer::symbols`] remains available afterward — the parser driver
    /// needs the interned identifier names once parsing begins.
    pub fn tokenize_all(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                tracing::debug!(tokens = tokens.len(), "tokenized source to EOF");
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_ok(source: &str) -> Vec<Token> {
        Lexer::new(source, "test.plus").tokenize_all().unwrap()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex_ok(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_lex_distinctly_from_identifiers() {
        assert_eq!(
            kinds("repeat number write and times newline"),
            vec![
                TokenKind::Repeat,
                TokenKind::NumberKw,
                TokenKind::Write,
                TokenKind::And,
                TokenKind::Times,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn negative_integer_is_one_token() {
        let tokens = lex_ok("-5");
        assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[0].lexeme, "-5");
        match &tokens[0].payload {
            TokenPayload::Integer(v) => assert_eq!(v.to_decimal_string(), "-5"),
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn decrement_assign_splits_correctly() {
        assert_eq!(
            kinds("x -= 5"),
            vec![
                TokenKind::Identifier,
                TokenKind::MinusAssign,
                TokenKind::IntegerLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn paired_comment_is_skipped() {
        assert_eq!(kinds("x ** a comment ** y"), kinds("x y"));
    }

    #[test]
    fn unterminated_comment_is_an_error() {
        let err = Lexer::new("x ** dangling", "t").tokenize_all().unwrap_err();
        assert!(matches!(err, LexError::UnterminatedComment { .. }));
    }

    #[test]
    fn bare_colon_and_dash_are_invalid_operators() {
        assert!(matches!(
            Lexer::new(":", "t").tokenize_all().unwrap_err(),
            LexError::InvalidOperator { byte: b':', .. }
        ));
        assert!(matches!(
            Lexer::new("- ", "t").tokenize_all().unwrap_err(),
            LexError::InvalidOperator { byte: b'-', .. }
        ));
    }

    #[test]
    fn bare_plus_and_star_are_valid_tokens() {
        assert_eq!(kinds("+ *"), vec![TokenKind::Plus, TokenKind::Star, TokenKind::Eof]);
    }

    #[test]
    fn string_literal_keeps_quotes_in_lexeme() {
        let tokens = lex_ok(r#""hi""#);
        assert_eq!(tokens[0].lexeme, "\"hi\"");
    }

    #[test]
    fn token_locations_are_monotonically_non_decreasing() {
        let tokens = lex_ok("number x;\nx := 7;");
        for pair in tokens.windows(2) {
            assert!(pair[0].location <= pair[1].location);
        }
    }

    #[test]
    fn reconstructs_source_from_lexemes_plus_skipped_trivia() {
        let source = "number x ; ** note ** x := 7 ;";
        let tokens = lex_ok(source);
        let rebuilt: String = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| t.lexeme.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rebuilt, "number x ; x := 7 ;");
    }
}
