//! The tree-walking evaluator.
//!
//! One flat [`Environment`] lives for the whole program — a loop body
//! does not get a fresh scope per iteration, and a loop's body statements
//! see (and can mutate) exactly the same bindings the rest of the program
//! does. `LoopStatement`'s body is either a bare `Statement` or a
//! `CodeBlock`; both run through the same per-iteration dispatch
//! ([`Evaluator::eval_loop_body`]) so a one-statement loop body costs
//! nothing extra over a braced one.

use std::io::Write;

use plus_par::ASTNode;
use plus_util::BigInt;

use crate::environment::Environment;
use crate::error::EvalError;

pub struct Evaluator<W: Write> {
    env: Environment,
    out: W,
}

impl<W: Write> Evaluator<W> {
    pub fn new(out: W) -> Self {
        Self {
            env: Environment::new(),
            out,
        }
    }

    /// Evaluates a complete `Program` node (the parser's accepted root).
    pub fn eval_program(&mut self, program: &ASTNode) -> Result<(), EvalError> {
        let ASTNode::Program { body, .. } = program else {
            unreachable!("eval_program is only ever called with a Program node");
        };
        self.eval_body(body)
    }

    fn eval_body(&mut self, node: &ASTNode) -> Result<(), EvalError> {
        let ASTNode::StatementList { statements, .. } = node else {
            unreachable!("Program's child is always a StatementList");
        };
        self.eval_statement_list(statements)
    }

    fn eval_statement_list(&mut self, statements: &[ASTNode]) -> Result<(), EvalError> {
        for statement in statements {
            self.eval_statement(statement)?;
        }
        Ok(())
    }

    fn eval_statement(&mut self, node: &ASTNode) -> Result<(), EvalError> {
        match node {
            ASTNode::Declaration { name, location } => {
                if !self.env.declare(name) {
                    return Err(EvalError::RedeclaredIdentifier {
                        name: name.clone(),
                        location: location.clone(),
                    });
                }
                Ok(())
            }
            ASTNode::Assignment {
                name,
                value,
                location,
            } => {
                self.require_declared(name, location)?;
                let value = self.eval_int_value(value)?;
                self.env.set(name, value);
                Ok(())
            }
            ASTNode::Increment {
                name,
                value,
                location,
            } => {
                self.require_declared(name, location)?;
                let delta = self.eval_int_value(value)?;
                let current = self.env.get(name).expect("checked above").clone();
                let updated = BigInt::signed_add(&current, &delta)
                    .map_err(|_| EvalError::BigIntOverflow {
                        location: location.clone(),
                    })?;
                self.env.set(name, updated);
                Ok(())
            }
            ASTNode::Decrement {
                name,
                value,
                location,
            } => {
                self.require_declared(name, location)?;
                let delta = self.eval_int_value(value)?;
                let current = self.env.get(name).expect("checked above").clone();
                let updated = BigInt::signed_sub(&current, &delta)
                    .map_err(|_| EvalError::BigIntOverflow {
                        location: location.clone(),
                    })?;
                self.env.set(name, updated);
                Ok(())
            }
            ASTNode::WriteStatement { output_list, .. } => self.eval_write(output_list),
            ASTNode::LoopStatement {
                count,
                body,
                location,
            } => self.eval_loop(count, body, location),
            ASTNode::CodeBlock { statements, .. } => self.eval_statement_list(statements),
            other => unreachable!("not a Statement node: {other:?}"),
        }
    }

    fn eval_loop(
        &mut self,
        count: &ASTNode,
        body: &ASTNode,
        location: &plus_util::SourceLocation,
    ) -> Result<(), EvalError> {
        let count = self.eval_int_value(count)?;
        if count.is_negative() {
            return Err(EvalError::NegativeLoopCount {
                value: count.to_decimal_string(),
                location: location.clone(),
            });
        }

        let one = BigInt::from_i64(1);
        let mut remaining = count;
        while !remaining.is_zero() {
            self.eval_loop_body(body)?;
            remaining = BigInt::signed_sub(&remaining, &one)
                .map_err(|_| EvalError::BigIntOverflow {
                    location: location.clone(),
                })?;
        }
        Ok(())
    }

    fn eval_loop_body(&mut self, body: &ASTNode) -> Result<(), EvalError> {
        match body {
            ASTNode::CodeBlock { statements, .. } => self.eval_statement_list(statements),
            statement => self.eval_statement(statement),
        }
    }

    fn eval_write(&mut self, output_list: &ASTNode) -> Result<(), EvalError> {
        let ASTNode::OutputList { elements, .. } = output_list else {
            unreachable!("WriteStatement's child is always an OutputList");
        };
        for element in elements {
            self.eval_list_element(element)?;
        }
        Ok(())
    }

    fn eval_list_element(&mut self, element: &ASTNode) -> Result<(), EvalError> {
        let ASTNode::ListElement { inner, .. } = element else {
            unreachable!("OutputList's children are always ListElement nodes");
        };
        match inner.as_ref() {
            ASTNode::IntValue { .. } => {
                let value = self.eval_int_value(inner)?;
                self.write_str(&value.to_decimal_string());
            }
            ASTNode::StringLiteral { text, .. } => self.write_str(text),
            ASTNode::Newline { .. } => self.write_str("\n"),
            other => unreachable!("not a ListElement payload: {other:?}"),
        }
        Ok(())
    }

    fn eval_int_value(&self, node: &ASTNode) -> Result<BigInt, EvalError> {
        let ASTNode::IntValue { inner, location } = node else {
            unreachable!("expected an IntValue node, got {node:?}");
        };
        match inner.as_ref() {
            ASTNode::IntegerLiteral { value, .. } => Ok(value.clone()),
            ASTNode::Identifier { name, .. } => {
                self.require_declared(name, location)?;
                Ok(self.env.get(name).expect("checked above").clone())
            }
            other => unreachable!("IntValue's child is always a literal or identifier: {other:?}"),
        }
    }

    fn require_declared(
        &self,
        name: &str,
        location: &plus_util::SourceLocation,
    ) -> Result<(), EvalError> {
        if self.env.is_declared(name) {
            Ok(())
        } else {
            Err(EvalError::UndeclaredIdentifier {
                name: name.to_string(),
                location: location.clone(),
            })
        }
    }

    fn write_str(&mut self, s: &str) {
        self.out
            .write_all(s.as_bytes())
            .expect("writing to the output sink should never fail");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plus_lex::Lexer;
    use plus_par::ParserBuilder;
    use std::rc::Rc;

    fn run(source: &str) -> String {
        let (grammar, tables) = ParserBuilder::build().unwrap();
        let mut lexer = Lexer::new(source, Rc::from("test.plus"));
        let tokens = lexer.tokenize_all().unwrap();
        let parser = plus_par::Parser::new(&grammar, &tables, lexer.symbols());
        let program = parser.parse(&tokens).unwrap();

        let mut out = Vec::new();
        let mut evaluator = Evaluator::new(&mut out);
        evaluator.eval_program(&program).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn run_err(source: &str) -> EvalError {
        let (grammar, tables) = ParserBuilder::build().unwrap();
        let mut lexer = Lexer::new(source, Rc::from("test.plus"));
        let tokens = lexer.tokenize_all().unwrap();
        let parser = plus_par::Parser::new(&grammar, &tables, lexer.symbols());
        let program = parser.parse(&tokens).unwrap();

        let mut out = Vec::new();
        let mut evaluator = Evaluator::new(&mut out);
        evaluator.eval_program(&program).unwrap_err()
    }

    #[test]
    fn declare_assign_write_round_trip() {
        assert_eq!(run("number x; x := 41; x += 1; write x;"), "42");
    }

    #[test]
    fn write_mixes_integers_strings_and_newlines() {
        assert_eq!(
            run(r#"number x; x := 5; write x and " apples" and newline;"#),
            "5 apples\n"
        );
    }

    #[test]
    fn loop_with_bare_statement_body_runs_exactly_n_times() {
        assert_eq!(run("number x; x := 0; repeat 5 times x += 1; write x;"), "5");
    }

    #[test]
    fn loop_with_code_block_body_shares_the_outer_scope() {
        assert_eq!(
            run("number x; number total; x := 0; total := 0; repeat 3 times { x += 1; total += x; } write total;"),
            "6"
        );
    }

    #[test]
    fn zero_count_loop_skips_the_body_entirely() {
        assert_eq!(run("number x; x := 9; repeat 0 times x += 1; write x;"), "9");
    }

    #[test]
    fn redeclaring_an_identifier_is_a_runtime_error() {
        assert!(matches!(
            run_err("number x; number x;"),
            EvalError::RedeclaredIdentifier { name, .. } if name == "x"
        ));
    }

    #[test]
    fn using_an_undeclared_identifier_is_a_runtime_error() {
        assert!(matches!(
            run_err("x := 1;"),
            EvalError::UndeclaredIdentifier { name, .. } if name == "x"
        ));
    }

    #[test]
    fn negative_loop_count_is_a_runtime_error() {
        assert!(matches!(
            run_err("repeat -1 times write newline;"),
            EvalError::NegativeLoopCount { .. }
        ));
    }
}
