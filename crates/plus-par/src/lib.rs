//! plus-par - LR(1) toolkit and parser.
//!
//! This crate is the algorithmic core of the pipeline: it builds the
//! PLUS grammar (`grammar`), computes Nullable/FIRST/FOLLOW (`sets`),
//! constructs the canonical LR(1) item-set collection (`item`, `lr1`),
//! synthesizes ACTION/GOTO tables with conflict detection (`table`), and
//! drives a shift/reduce parse over a token stream into an AST (`ast`,
//! `driver`).
//!
//! [`ParserBuilder`] ties the pieces together: build once per process
//! (the grammar is fixed, so the tables never change between parses) and
//! reuse the resulting tables across files.

pub mod ast;
pub mod driver;
pub mod error;
pub mod grammar;
pub mod item;
pub mod lr1;
pub mod sets;
pub mod table;

pub use ast::ASTNode;
pub use driver::Parser;
pub use error::{BuildError, ParseError};
pub use grammar::{Grammar, GrammarSymbol, NonTerminalId, Production, ProductionId, SemanticAction};
pub use item::{ItemCore, ItemSet, StateId};
pub use lr1::CanonicalCollection;
pub use sets::{SetEngine, TerminalSet};
pub use table::{Action, ParseTables};

/// Builds the grammar, set engine, canonical collection, and ACTION/GOTO
/// tables in one call, returning everything the driver needs to parse.
/// Intended to run once at process startup (see `plus-drv::run`).
pub struct ParserBuilder;

impl ParserBuilder {
    pub fn build() -> Result<(Grammar, ParseTables), BuildError> {
        let grammar = Grammar::plus();
        let sets = SetEngine::compute(&grammar);
        let collection = lr1::build(&grammar, &sets);
        let tables = table::build(&grammar, &collection)?;
        Ok((grammar, tables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_succeeds_for_the_shipped_grammar() {
        assert!(ParserBuilder::build().is_ok());
    }
}
