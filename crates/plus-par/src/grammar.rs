//! The PLUS grammar: symbols, productions, and the closed semantic-action
//! vocabulary that turns a reduce into an AST node.
//!
//! Terminal ids coincide with [`TokenKind`]'s discriminants; nonterminal
//! ids are a disjoint dense range assigned by [`NonTerminalId`]. Production
//! 0 is always the augmented start `S' -> Program` — it never actually
//! reduces (the parser driver intercepts it with `accept` before a reduce
//! would fire, see [`crate::driver`]), but it has to exist as a real
//! production so the LR(1) item-set construction has a single unambiguous
//! start item.

use plus_lex::TokenKind;
use plus_util::{Idx, IndexVec};

/// Dense id of a nonterminal. `0` is always the augmented start symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminalId(u32);

impl Idx for NonTerminalId {
    fn from_usize(idx: usize) -> Self {
        NonTerminalId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A symbol on the right-hand side of a production: either a terminal
/// (lexer-produced token kind) or a nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarSymbol {
    Terminal(TokenKind),
    NonTerminal(NonTerminalId),
}

/// Dense id of a production, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductionId(u32);

impl Idx for ProductionId {
    fn from_usize(idx: usize) -> Self {
        ProductionId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tag distinguishing which shape of list a [`SemanticAction::ListExtend`]/
/// [`SemanticAction::ListSingleton`] action builds. The grammar has two
/// structurally identical left-recursive list productions (`StatementList`
/// and `OutputList`) that must materialize distinct AST node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    StatementList,
    OutputList,
}

/// The closed set of semantic actions a production can carry, dispatched
/// from a single match arm rather than through function pointers.
/// [`crate::ast::apply`] is that match arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticAction {
    /// Returns the first child verbatim, discarding any trailing
    /// punctuation children (e.g. `Statement -> Assignment ';'`).
    Passthrough,
    ListExtend(ListKind),
    ListSingleton(ListKind),
    Declaration,
    Assignment,
    Increment,
    Decrement,
    Write,
    Loop,
    CodeBlock,
    ListElement,
    IntValue,
    /// `Program -> StatementList`: wraps the child in a `Program` node.
    /// This is the real start production; the augmented `S' -> Program`
    /// above it carries [`SemanticAction::Passthrough`] and never fires in
    /// practice (see module docs).
    Program,
}

#[derive(Debug, Clone)]
pub struct Production {
    pub id: ProductionId,
    pub lhs: NonTerminalId,
    pub rhs: Vec<GrammarSymbol>,
    pub action: SemanticAction,
}

/// The grammar: a flat list of productions plus enough bookkeeping
/// (nonterminal names, the start symbol, the augmented start production)
/// to drive FIRST/FOLLOW and LR(1) construction.
pub struct Grammar {
    pub productions: IndexVec<ProductionId, Production>,
    pub nonterminal_names: IndexVec<NonTerminalId, &'static str>,
    /// The augmented start symbol, `S'`. Always nonterminal 0.
    pub augmented_start: NonTerminalId,
    /// The grammar's real start symbol, `Program`.
    pub start: NonTerminalId,
    pub eof: TokenKind,
}

macro_rules! nonterminals {
    ($($name:ident),+ $(,)?) => {
        #[allow(non_snake_case)]
        struct NonTerminals { $($name: NonTerminalId),+ }
    };
}

nonterminals!(
    StartPrime,
    Program,
    StatementList,
    Statement,
    Declaration,
    Assignment,
    Increment,
    Decrement,
    WriteStatement,
    LoopStatement,
    CodeBlock,
    OutputList,
    ListElement,
    IntValue,
);

impl Grammar {
    /// Builds the PLUS grammar.
    pub fn plus() -> Self {
        use GrammarSymbol::{NonTerminal as NT, Terminal as T};
        use SemanticAction as A;

        let mut names: IndexVec<NonTerminalId, &'static str> = IndexVec::new();
        let mut next = |name: &'static str| names.push(name);

        let ids = NonTerminals {
            StartPrime: next("S'"),
            Program: next("Program"),
            StatementList: next("StatementList"),
            Statement: next("Statement"),
            Declaration: next("Declaration"),
            Assignment: next("Assignment"),
            Increment: next("Increment"),
            Decrement: next("Decrement"),
            WriteStatement: next("WriteStatement"),
            LoopStatement: next("LoopStatement"),
            CodeBlock: next("CodeBlock"),
            OutputList: next("OutputList"),
            ListElement: next("ListElement"),
            IntValue: next("IntValue"),
        };

        let mut productions: IndexVec<ProductionId, Production> = IndexVec::new();
        let mut add = |lhs: NonTerminalId, rhs: Vec<GrammarSymbol>, action: SemanticAction| {
            let id = ProductionId::from_usize(productions.len());
            productions.push(Production {
                id,
                lhs,
                rhs,
                action,
            });
        };

        // 0: S' -> Program
        add(ids.StartPrime, vec![NT(ids.Program)], A::Passthrough);
        // 1: Program -> StatementList
        add(ids.Program, vec![NT(ids.StatementList)], A::Program);
        // 2: StatementList -> StatementList Statement
        add(
            ids.StatementList,
            vec![NT(ids.StatementList), NT(ids.Statement)],
            A::ListExtend(ListKind::StatementList),
        );
        // 3: StatementList -> Statement
        add(
            ids.StatementList,
            vec![NT(ids.Statement)],
            A::ListSingleton(ListKind::StatementList),
        );
        // 4..9: Statement -> Assignment ';' | Declaration ';' | Increment ';'
        //                   | Decrement ';' | WriteStatement ';' | LoopStatement
        add(
            ids.Statement,
            vec![NT(ids.Assignment), T(TokenKind::Semicolon)],
            A::Passthrough,
        );
        add(
            ids.Statement,
            vec![NT(ids.Declaration), T(TokenKind::Semicolon)],
            A::Passthrough,
        );
        add(
            ids.Statement,
            vec![NT(ids.Increment), T(TokenKind::Semicolon)],
            A::Passthrough,
        );
        add(
            ids.Statement,
            vec![NT(ids.Decrement), T(TokenKind::Semicolon)],
            A::Passthrough,
        );
        add(
            ids.Statement,
            vec![NT(ids.WriteStatement), T(TokenKind::Semicolon)],
            A::Passthrough,
        );
        add(
            ids.Statement,
            vec![NT(ids.LoopStatement)],
            A::Passthrough,
        );
        // 10: Declaration -> 'number' Identifier
        add(
            ids.Declaration,
            vec![T(TokenKind::NumberKw), T(TokenKind::Identifier)],
            A::Declaration,
        );
        // 11: Assignment -> Identifier ':=' IntValue
        add(
            ids.Assignment,
            vec![T(TokenKind::Identifier), T(TokenKind::Assign), NT(ids.IntValue)],
            A::Assignment,
        );
        // 12: Increment -> Identifier '+=' IntValue
        add(
            ids.Increment,
            vec![
                T(TokenKind::Identifier),
                T(TokenKind::PlusAssign),
                NT(ids.IntValue),
            ],
            A::Increment,
        );
        // 13: Decrement -> Identifier '-=' IntValue
        add(
            ids.Decrement,
            vec![
                T(TokenKind::Identifier),
                T(TokenKind::MinusAssign),
                NT(ids.IntValue),
            ],
            A::Decrement,
        );
        // 14: WriteStatement -> 'write' OutputList
        add(
            ids.WriteStatement,
            vec![T(TokenKind::Write), NT(ids.OutputList)],
            A::Write,
        );
        // 15: LoopStatement -> 'repeat' IntValue 'times' Statement
        add(
            ids.LoopStatement,
            vec![
                T(TokenKind::Repeat),
                NT(ids.IntValue),
                T(TokenKind::Times),
                NT(ids.Statement),
            ],
            A::Loop,
        );
        // 16: LoopStatement -> 'repeat' IntValue 'times' CodeBlock
        add(
            ids.LoopStatement,
            vec![
                T(TokenKind::Repeat),
                NT(ids.IntValue),
                T(TokenKind::Times),
                NT(ids.CodeBlock),
            ],
            A::Loop,
        );
        // 17: CodeBlock -> '{' StatementList '}'
        add(
            ids.CodeBlock,
            vec![
                T(TokenKind::LBrace),
                NT(ids.StatementList),
                T(TokenKind::RBrace),
            ],
            A::CodeBlock,
        );
        // 18: OutputList -> OutputList 'and' ListElement
        add(
            ids.OutputList,
            vec![NT(ids.OutputList), T(TokenKind::And), NT(ids.ListElement)],
            A::ListExtend(ListKind::OutputList),
        );
        // 19: OutputList -> ListElement
        add(
            ids.OutputList,
            vec![NT(ids.ListElement)],
            A::ListSingleton(ListKind::OutputList),
        );
        // 20: ListElement -> IntValue
        add(ids.ListElement, vec![NT(ids.IntValue)], A::ListElement);
        // 21: ListElement -> StringLiteral
        add(
            ids.ListElement,
            vec![T(TokenKind::StringLiteral)],
            A::ListElement,
        );
        // 22: ListElement -> 'newline'
        add(
            ids.ListElement,
            vec![T(TokenKind::Newline)],
            A::ListElement,
        );
        // 23: IntValue -> IntegerLiteral
        add(ids.IntValue, vec![T(TokenKind::IntegerLiteral)], A::IntValue);
        // 24: IntValue -> Identifier
        add(ids.IntValue, vec![T(TokenKind::Identifier)], A::IntValue);

        Grammar {
            productions,
            nonterminal_names: names,
            augmented_start: ids.StartPrime,
            start: ids.Program,
            eof: TokenKind::Eof,
        }
    }

    pub fn nonterminal_count(&self) -> usize {
        self.nonterminal_names.len()
    }

    pub fn nonterminal_name(&self, id: NonTerminalId) -> &'static str {
        self.nonterminal_names[id]
    }

    /// Productions whose left-hand side is `lhs`, in declaration order.
    pub fn productions_for(&self, lhs: NonTerminalId) -> impl Iterator<Item = &Production> {
        self.productions.iter().filter(move |p| p.lhs == lhs)
    }

    pub fn production(&self, id: ProductionId) -> &Production {
        &self.productions[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_zero_is_the_augmented_start() {
        let grammar = Grammar::plus();
        let p0 = grammar.production(ProductionId::from_usize(0));
        assert_eq!(p0.lhs, grammar.augmented_start);
        assert_eq!(p0.rhs, vec![GrammarSymbol::NonTerminal(grammar.start)]);
    }

    #[test]
    fn every_nonterminal_has_at_least_one_production() {
        let grammar = Grammar::plus();
        for id in grammar.nonterminal_names.indices() {
            if id == grammar.augmented_start {
                continue;
            }
            assert!(
                grammar.productions_for(id).next().is_some(),
                "{} has no productions",
                grammar.nonterminal_name(id)
            );
        }
    }
}
