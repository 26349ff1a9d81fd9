//! The parser driver: the classic shift/reduce loop over a precomputed
//! ACTION/GOTO table, assembling the AST as it goes.
//!
//! The stack holds `(state, node)` pairs with a bottom sentinel
//! `(state 0, None)` standing in for `⊥`. Every shift synthesizes an
//! AST leaf from the shifted token before pushing it — an `Identifier`
//! node for identifier tokens, `IntegerLiteral`/`StringLiteral` for their
//! literals, `Newline` for the `newline` keyword, and `Keyword` (a bare
//! location anchor) for everything else — so every item on the stack
//! above the sentinel always carries a real node; no child a semantic
//! action reads in [`crate::ast::apply`] is ever absent.

use plus_lex::{SymbolTable, Token, TokenKind, TokenPayload};
use plus_util::Idx;

use crate::ast::{self, ASTNode};
use crate::error::ParseError;
use crate::grammar::Grammar;
use crate::item::StateId;
use crate::table::{Action, ParseTables};

pub struct Parser<'a> {
    grammar: &'a Grammar,
    tables: &'a ParseTables,
    symbols: &'a SymbolTable,
}

impl<'a> Parser<'a> {
    pub fn new(grammar: &'a Grammar, tables: &'a ParseTables, symbols: &'a SymbolTable) -> Self {
        Self {
            grammar,
            tables,
            symbols,
        }
    }

    /// Parses a complete token stream (which must end in an `Eof` token)
    /// into the program's `Program` AST node.
    pub fn parse(&self, tokens: &[Token]) -> Result<ASTNode, ParseError> {
        let mut stack: Vec<(StateId, Option<ASTNode>)> = vec![(StateId::from_usize(0), None)];
        let mut position = 0usize;

        loop {
            let token = &tokens[position];
            let (state, _) = *stack.last().expect("stack is never empty");

            match self.tables.action.get(&(state, token.kind)) {
                Some(Action::Shift(next)) => {
                    tracing::trace!(?state, token = token.kind.display_name(), next = ?next, "shift");
                    let leaf = self.leaf_for(token);
                    stack.push((*next, Some(leaf)));
                    position += 1;
                }
                Some(Action::Reduce(production_id)) => {
                    tracing::trace!(?state, production = ?production_id, "reduce");
                    let production = self.grammar.production(*production_id);
                    let arity = production.rhs.len();
                    let mut children = Vec::with_capacity(arity);
                    for _ in 0..arity {
                        let (_, node) = stack.pop().expect("reduce pops only real frames");
                        children.push(node.expect("every stacked frame above bottom carries a node"));
                    }
                    children.reverse();

                    let node = ast::apply(production.action, children);

                    let (from_state, _) = *stack.last().expect("stack is never empty");
                    let goto_state = *self
                        .tables
                        .goto
                        .get(&(from_state, production.lhs))
                        .expect("a successfully reduced production always has a GOTO entry");
                    stack.push((goto_state, Some(node)));
                }
                Some(Action::Accept) => {
                    let (_, node) = stack.pop().expect("accept pops the final frame");
                    return Ok(node.expect("the accepted frame always carries the Program node"));
                }
                None => {
                    return Err(ParseError::UnexpectedToken {
                        kind: token.kind,
                        lexeme: token.lexeme.clone(),
                        location: token.location.clone(),
                    });
                }
            }
        }
    }

    fn leaf_for(&self, token: &Token) -> ASTNode {
        let location = token.location.clone();
        match token.kind {
            TokenKind::Identifier => {
                let name = match &token.payload {
                    TokenPayload::Symbol(id) => self.symbols.name(*id).to_string(),
                    _ => unreachable!("Identifier tokens always carry a Symbol payload"),
                };
                ASTNode::Identifier { name, location }
            }
            TokenKind::IntegerLiteral => {
                let value = match &token.payload {
                    TokenPayload::Integer(value) => value.clone(),
                    _ => unreachable!("IntegerLiteral tokens always carry an Integer payload"),
                };
                ASTNode::IntegerLiteral { value, location }
            }
            TokenKind::StringLiteral => {
                let text = match &token.payload {
                    TokenPayload::Text(text) => strip_quotes(text),
                    _ => unreachable!("StringLiteral tokens always carry a Text payload"),
                };
                ASTNode::StringLiteral { text, location }
            }
            TokenKind::Newline => ASTNode::Newline { location },
            _ => ASTNode::Keyword {
                lexeme: token.lexeme.clone(),
                location,
            },
        }
    }
}

/// Strips a leading and trailing `"` from a string-literal lexeme. The
/// lexer's `StringLiteral` payload keeps the quotes (plus-lex's
/// `error.rs`/`lexer.rs` docs), so the driver is the layer that removes
/// them for the evaluator.
fn strip_quotes(text: &str) -> String {
    text.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::lr1;
    use crate::sets::SetEngine;
    use crate::table;
    use plus_lex::Lexer;
    use std::rc::Rc;

    fn parse_source(source: &str) -> ASTNode {
        let grammar = Grammar::plus();
        let sets = SetEngine::compute(&grammar);
        let collection = lr1::build(&grammar, &sets);
        let tables = table::build(&grammar, &collection).unwrap();

        let mut lexer = Lexer::new(source, Rc::from("test.plus"));
        let tokens = lexer.tokenize_all().unwrap();
        let parser = Parser::new(&grammar, &tables, lexer.symbols());
        parser.parse(&tokens).unwrap()
    }

    #[test]
    fn accepted_tree_is_rooted_at_program_with_one_statement_list_child() {
        let program = parse_source("number x; x := 5;");
        match program {
            ASTNode::Program { body, .. } => {
                assert!(matches!(*body, ASTNode::StatementList { .. }));
            }
            other => panic!("expected Program, got {other:?}"),
        }
    }

    #[test]
    fn statement_list_has_one_entry_per_source_statement() {
        let program = parse_source("number x; x := 1; x += 2; write x;");
        match program {
            ASTNode::Program { body, .. } => match *body {
                ASTNode::StatementList { statements, .. } => {
                    assert_eq!(statements.len(), 4);
                }
                other => panic!("expected StatementList, got {other:?}"),
            },
            other => panic!("expected Program, got {other:?}"),
        }
    }

    #[test]
    fn loop_with_bare_statement_body_and_with_code_block_both_parse() {
        parse_source("repeat 3 times write \"hi\";");
        parse_source("repeat 3 times { write \"hi\"; }");
    }

    #[test]
    fn unexpected_token_is_reported_with_its_location() {
        let grammar = Grammar::plus();
        let sets = SetEngine::compute(&grammar);
        let collection = lr1::build(&grammar, &sets);
        let tables = table::build(&grammar, &collection).unwrap();

        let mut lexer = Lexer::new("number ;", Rc::from("bad.plus"));
        let tokens = lexer.tokenize_all().unwrap();
        let parser = Parser::new(&grammar, &tables, lexer.symbols());
        let err = parser.parse(&tokens).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }
}
