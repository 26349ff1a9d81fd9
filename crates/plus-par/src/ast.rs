//! The abstract syntax tree and the semantic actions that build it.
//!
//! Every node owns its children outright (`Box`/`Vec`, never a shared or
//! cyclic reference) and carries a [`SourceLocation`] so that
//! evaluator-time errors can still point back
//! at source text. [`Keyword`] exists purely as a location anchor: it is
//! the AST leaf produced when the driver shifts a punctuation or keyword
//! token that carries no semantic payload of its own (e.g. `'number'`,
//! `';'`, `'{'`) — see [`crate::driver`] for where these are synthesized.

use plus_util::{BigInt, SourceLocation};

use crate::grammar::{ListKind, SemanticAction};

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Program {
        body: Box<ASTNode>,
        location: SourceLocation,
    },
    StatementList {
        statements: Vec<ASTNode>,
        location: SourceLocation,
    },
    Declaration {
        name: String,
        location: SourceLocation,
    },
    Assignment {
        name: String,
        value: Box<ASTNode>,
        location: SourceLocation,
    },
    Increment {
        name: String,
        value: Box<ASTNode>,
        location: SourceLocation,
    },
    Decrement {
        name: String,
        value: Box<ASTNode>,
        location: SourceLocation,
    },
    WriteStatement {
        output_list: Box<ASTNode>,
        location: SourceLocation,
    },
    LoopStatement {
        count: Box<ASTNode>,
        body: Box<ASTNode>,
        location: SourceLocation,
    },
    CodeBlock {
        statements: Vec<ASTNode>,
        location: SourceLocation,
    },
    OutputList {
        elements: Vec<ASTNode>,
        location: SourceLocation,
    },
    ListElement {
        inner: Box<ASTNode>,
        location: SourceLocation,
    },
    Identifier {
        name: String,
        location: SourceLocation,
    },
    IntegerLiteral {
        value: BigInt,
        location: SourceLocation,
    },
    StringLiteral {
        text: String,
        location: SourceLocation,
    },
    Newline {
        location: SourceLocation,
    },
    IntValue {
        inner: Box<ASTNode>,
        location: SourceLocation,
    },
    /// A punctuation or keyword leaf kept only as a source-location
    /// anchor; never appears in the finished tree handed to the evaluator
    /// (every semantic action that consumes one discards it).
    Keyword {
        lexeme: String,
        location: SourceLocation,
    },
}

impl ASTNode {
    pub fn location(&self) -> &SourceLocation {
        match self {
            ASTNode::Program { location, .. }
            | ASTNode::StatementList { location, .. }
            | ASTNode::Declaration { location, .. }
            | ASTNode::Assignment { location, .. }
            | ASTNode::Increment { location, .. }
            | ASTNode::Decrement { location, .. }
            | ASTNode::WriteStatement { location, .. }
            | ASTNode::LoopStatement { location, .. }
            | ASTNode::CodeBlock { location, .. }
            | ASTNode::OutputList { location, .. }
            | ASTNode::ListElement { location, .. }
            | ASTNode::Identifier { location, .. }
            | ASTNode::IntegerLiteral { location, .. }
            | ASTNode::StringLiteral { location, .. }
            | ASTNode::Newline { location }
            | ASTNode::IntValue { location, .. }
            | ASTNode::Keyword { location, .. } => location,
        }
    }

    fn identifier_name(&self) -> &str {
        match self {
            ASTNode::Identifier { name, .. } => name,
            other => unreachable!("expected Identifier, got {other:?}"),
        }
    }

    fn into_statement_list(self) -> (Vec<ASTNode>, SourceLocation) {
        match self {
            ASTNode::StatementList {
                statements,
                location,
            } => (statements, location),
            other => unreachable!("expected StatementList, got {other:?}"),
        }
    }

    fn into_output_list(self) -> (Vec<ASTNode>, SourceLocation) {
        match self {
            ASTNode::OutputList { elements, location } => (elements, location),
            other => unreachable!("expected OutputList, got {other:?}"),
        }
    }
}

/// Applies a production's semantic action to its (already-reduced)
/// children, producing the parent node. `children` is ordered exactly as
/// the production's right-hand side; every child is itself an [`ASTNode`]
/// (the driver never leaves a shifted punctuation token un-materialized —
/// see [`crate::driver`]'s module docs).
///
/// The location convention is uniform: a constructed node's location is
/// always its leftmost child's location, which for every production in
/// this grammar is either the statement's first keyword/identifier (a
/// natural anchor) or an already-located sub-expression.
pub fn apply(action: SemanticAction, mut children: Vec<ASTNode>) -> ASTNode {
    let location = children[0].location().clone();
    match action {
        SemanticAction::Passthrough => children.remove(0),
        SemanticAction::Program => ASTNode::Program {
            body: Box::new(children.remove(0)),
            location,
        },
        SemanticAction::ListExtend(ListKind::StatementList) => {
            let statement = children.remove(1);
            let (mut statements, location) = children.remove(0).into_statement_list();
            statements.push(statement);
            ASTNode::StatementList {
                statements,
                location,
            }
        }
        SemanticAction::ListSingleton(ListKind::StatementList) => {
            let statement = children.remove(0);
            let location = statement.location().clone();
            ASTNode::StatementList {
                statements: vec![statement],
                location,
            }
        }
        SemanticAction::ListExtend(ListKind::OutputList) => {
            let element = children.remove(2);
            let (mut elements, location) = children.remove(0).into_output_list();
            elements.push(element);
            ASTNode::OutputList { elements, location }
        }
        SemanticAction::ListSingleton(ListKind::OutputList) => {
            let element = children.remove(0);
            let location = element.location().clone();
            ASTNode::OutputList {
                elements: vec![element],
                location,
            }
        }
        SemanticAction::Declaration => {
            let name = children[1].identifier_name().to_string();
            ASTNode::Declaration { name, location }
        }
        SemanticAction::Assignment => {
            let name = children[0].identifier_name().to_string();
            ASTNode::Assignment {
                name,
                value: Box::new(children.remove(2)),
                location,
            }
        }
        SemanticAction::Increment => {
            let name = children[0].identifier_name().to_string();
            ASTNode::Increment {
                name,
                value: Box::new(children.remove(2)),
                location,
            }
        }
        SemanticAction::Decrement => {
            let name = children[0].identifier_name().to_string();
            ASTNode::Decrement {
                name,
                value: Box::new(children.remove(2)),
                location,
            }
        }
        SemanticAction::Write => ASTNode::WriteStatement {
            output_list: Box::new(children.remove(1)),
            location,
        },
        SemanticAction::Loop => ASTNode::LoopStatement {
            count: Box::new(children.remove(1)),
            body: Box::new(children.remove(2)),
            location,
        },
        SemanticAction::CodeBlock => {
            let (statements, _) = children.remove(1).into_statement_list();
            ASTNode::CodeBlock {
                statements,
                location,
            }
        }
        SemanticAction::ListElement => ASTNode::ListElement {
            inner: Box::new(children.remove(0)),
            location,
        },
        SemanticAction::IntValue => ASTNode::IntValue {
            inner: Box::new(children.remove(0)),
            location,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn loc(line: u32, column: u32) -> SourceLocation {
        SourceLocation::new(line, column, Rc::from("test.plus"))
    }

    #[test]
    fn passthrough_drops_trailing_punctuation() {
        let assignment = ASTNode::Assignment {
            name: "x".into(),
            value: Box::new(ASTNode::IntValue {
                inner: Box::new(ASTNode::IntegerLiteral {
                    value: BigInt::zero(),
                    location: loc(1, 0),
                }),
                location: loc(1, 0),
            }),
            location: loc(1, 0),
        };
        let semicolon = ASTNode::Keyword {
            lexeme: ";".into(),
            location: loc(1, 5),
        };
        let statement = apply(SemanticAction::Passthrough, vec![assignment.clone(), semicolon]);
        assert_eq!(statement, assignment);
    }

    #[test]
    fn list_singleton_then_extend_builds_in_order() {
        let s1 = ASTNode::Declaration {
            name: "x".into(),
            location: loc(1, 0),
        };
        let singleton = apply(
            SemanticAction::ListSingleton(ListKind::StatementList),
            vec![s1.clone()],
        );
        let s2 = ASTNode::Declaration {
            name: "y".into(),
            location: loc(2, 0),
        };
        let extended = apply(
            SemanticAction::ListExtend(ListKind::StatementList),
            vec![singleton, s2.clone()],
        );
        match extended {
            ASTNode::StatementList { statements, .. } => {
                assert_eq!(statements, vec![s1, s2]);
            }
            other => panic!("expected StatementList, got {other:?}"),
        }
    }

    #[test]
    fn declaration_takes_identifier_name_and_keyword_location() {
        let keyword = ASTNode::Keyword {
            lexeme: "number".into(),
            location: loc(3, 0),
        };
        let identifier = ASTNode::Identifier {
            name: "count".into(),
            location: loc(3, 7),
        };
        let decl = apply(SemanticAction::Declaration, vec![keyword, identifier]);
        match decl {
            ASTNode::Declaration { name, location } => {
                assert_eq!(name, "count");
                assert_eq!(location, loc(3, 0));
            }
            other => panic!("expected Declaration, got {other:?}"),
        }
    }
}
