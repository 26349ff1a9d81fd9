//! ACTION/GOTO table synthesis and conflict detection.

use plus_lex::TokenKind;
use rustc_hash::FxHashMap;

use crate::error::BuildError;
use crate::grammar::{Grammar, GrammarSymbol, NonTerminalId, ProductionId};
use crate::item::StateId;
use crate::lr1::CanonicalCollection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(StateId),
    Reduce(ProductionId),
    Accept,
}

pub struct ParseTables {
    pub action: FxHashMap<(StateId, TokenKind), Action>,
    pub goto: FxHashMap<(StateId, NonTerminalId), StateId>,
}

/// Builds ACTION/GOTO from a canonical collection, shifts first (so a
/// later-discovered reduce on the same `(state, terminal)` cell is what
/// reports the conflict — shift always wins the slot, matching the
/// classic "shift/reduce resolves to shift" convention, but the conflict
/// is still surfaced rather than silently resolved).
pub fn build(
    grammar: &Grammar,
    collection: &CanonicalCollection,
) -> Result<ParseTables, BuildError> {
    let mut action: FxHashMap<(StateId, TokenKind), Action> = FxHashMap::default();
    let mut goto: FxHashMap<(StateId, NonTerminalId), StateId> = FxHashMap::default();

    for (&(state, symbol), &target) in &collection.transitions {
        match symbol {
            GrammarSymbol::Terminal(terminal) => {
                action.insert((state, terminal), Action::Shift(target));
            }
            GrammarSymbol::NonTerminal(nonterminal) => {
                goto.insert((state, nonterminal), target);
            }
        }
    }

    let start_production = grammar
        .productions
        .iter()
        .find(|p| p.lhs == grammar.augmented_start)
        .expect("augmented start production always exists");

    for state_id in collection.states.indices() {
        for (core, lookahead) in collection.states[state_id].iter() {
            let production = grammar.production(core.production);
            if core.dot != production.rhs.len() {
                continue;
            }

            if core.production == start_production.id {
                action.insert((state_id, grammar.eof), Action::Accept);
                continue;
            }

            for &terminal in lookahead {
                match action.get(&(state_id, terminal)) {
                    None => {
                        action.insert((state_id, terminal), Action::Reduce(core.production));
                    }
                    Some(Action::Shift(target)) => {
                        return Err(BuildError::ShiftReduceConflict {
                            state: state_id,
                            terminal: terminal.display_name(),
                            shift: *target,
                            reduce: core.production,
                        });
                    }
                    Some(Action::Reduce(existing)) if *existing != core.production => {
                        return Err(BuildError::ReduceReduceConflict {
                            state: state_id,
                            terminal: terminal.display_name(),
                            first: *existing,
                            second: core.production,
                        });
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(ParseTables { action, goto })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lr1;
    use crate::sets::SetEngine;
    use plus_util::Idx;

    #[test]
    fn plus_grammar_builds_without_conflicts() {
        let grammar = Grammar::plus();
        let sets = SetEngine::compute(&grammar);
        let collection = lr1::build(&grammar, &sets);
        let result = build(&grammar, &collection);
        assert!(result.is_ok(), "unexpected conflict: {:?}", result.err());
    }

    #[test]
    fn initial_state_can_shift_every_statement_starting_terminal() {
        let grammar = Grammar::plus();
        let sets = SetEngine::compute(&grammar);
        let collection = lr1::build(&grammar, &sets);
        let tables = build(&grammar, &collection).unwrap();
        let start = StateId::from_usize(0);
        for terminal in [
            TokenKind::Identifier,
            TokenKind::NumberKw,
            TokenKind::Write,
            TokenKind::Repeat,
        ] {
            assert!(
                tables.action.contains_key(&(start, terminal)),
                "expected an action for {terminal:?} in the initial state"
            );
        }
    }
}
