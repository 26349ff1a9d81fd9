//! Canonical LR(1) item-set construction: `Closure`, `Goto`, and the
//! breadth-first enumeration of the canonical collection.
//!
//! Within a single state's `ItemSet`, items with identical cores
//! `(production, dot)` always share one lookahead *set* rather than
//! being tracked as separate single-lookahead items. This is lossless: a
//! state's `ItemSet` already stores exactly the union of lookaheads
//! closure would have produced for that state, so bundling them into one
//! set-valued item changes no information, only the storage shape.
//!
//! Distinct *states*, by contrast, are deduplicated by full equality —
//! core **and** lookahead set both (`build`'s `states[id] == target`
//! check; see [`crate::item::ItemSet`]'s `PartialEq`) — never by core
//! alone. Classical LALR(1) additionally collapses states that share a
//! core set but disagree on lookaheads, which can introduce conflicts a
//! canonical construction would not have had; this toolkit never takes
//! that step, so it builds the strict canonical LR(1) collection rather
//! than an LALR(1) one, and "merge-induced conflict" is not a condition
//! that can arise here — every `BuildError` conflict is a genuine
//! conflict in the canonical LR(1) automaton itself.

use plus_util::{Idx, IndexVec};
use rustc_hash::FxHashMap;

use crate::grammar::{Grammar, GrammarSymbol};
use crate::item::{symbol_after_dot, ItemCore, ItemSet, StateId};
use crate::sets::{SetEngine, TerminalSet};

/// The canonical collection of LR(1) states plus the GOTO transitions
/// between them.
pub struct CanonicalCollection {
    pub states: IndexVec<StateId, ItemSet>,
    pub transitions: FxHashMap<(StateId, GrammarSymbol), StateId>,
}

/// Closes `items` under the standard LR(1) closure rule: for every item
/// `[A -> α.Bβ, a]` with `B` a nonterminal, and for every production
/// `B -> γ`, add `[B -> .γ, b]` for every `b` in `FIRST(βa)`. Repeats
/// until a full sweep adds nothing.
pub fn closure(grammar: &Grammar, sets: &SetEngine, mut items: ItemSet) -> ItemSet {
    loop {
        let mut changed = false;
        let snapshot: Vec<(ItemCore, TerminalSet)> =
            items.iter().map(|(c, l)| (*c, l.clone())).collect();

        for (core, lookahead) in &snapshot {
            let Some(GrammarSymbol::NonTerminal(b)) = symbol_after_dot(grammar, core) else {
                continue;
            };
            let production = grammar.production(core.production);
            let beta = &production.rhs[core.dot + 1..];
            let propagated = sets.first_of_sequence(beta, lookahead);

            for candidate in grammar.productions_for(b) {
                let new_core = ItemCore {
                    production: candidate.id,
                    dot: 0,
                };
                changed |= items.insert(new_core, propagated.clone());
            }
        }

        if !changed {
            return items;
        }
    }
}

/// `Goto(I, X)`: the closure of every item in `I` whose dot sits just
/// before `X`, advanced one position past `X`.
pub fn goto(grammar: &Grammar, sets: &SetEngine, items: &ItemSet, symbol: GrammarSymbol) -> ItemSet {
    let mut moved = ItemSet::new();
    for (core, lookahead) in items.iter() {
        if symbol_after_dot(grammar, core) == Some(symbol) {
            let advanced = ItemCore {
                production: core.production,
                dot: core.dot + 1,
            };
            moved.insert(advanced, lookahead.clone());
        }
    }
    closure(grammar, sets, moved)
}

/// Every grammar symbol (terminal or nonterminal) that appears anywhere
/// in the grammar, used to enumerate which `Goto` transitions to try out
/// of each state.
fn all_symbols(grammar: &Grammar) -> Vec<GrammarSymbol> {
    let mut symbols = Vec::new();
    for production in grammar.productions.iter() {
        for symbol in &production.rhs {
            if !symbols.contains(symbol) {
                symbols.push(*symbol);
            }
        }
    }
    symbols
}

/// Builds the canonical collection by breadth-first state discovery,
/// starting from the closure of the augmented item
/// `[S' -> .Program, {$}]`. New item sets are compared against every
/// existing state for full equality (core set and lookahead sets both);
/// the grammar is small enough that the resulting O(states^2) dedup cost
/// is immaterial.
pub fn build(grammar: &Grammar, sets: &SetEngine) -> CanonicalCollection {
    let start_production = grammar
        .productions
        .iter()
        .find(|p| p.lhs == grammar.augmented_start)
        .expect("augmented start production always exists")
        .id;

    let mut initial = ItemSet::new();
    let mut eof_only = TerminalSet::default();
    eof_only.insert(grammar.eof);
    initial.insert(
        ItemCore {
            production: start_production,
            dot: 0,
        },
        eof_only,
    );
    let initial = closure(grammar, sets, initial);

    let mut states: IndexVec<StateId, ItemSet> = IndexVec::new();
    let mut transitions: FxHashMap<(StateId, GrammarSymbol), StateId> = FxHashMap::default();
    states.push(initial);

    let symbols = all_symbols(grammar);
    let mut frontier = vec![StateId::from_usize(0)];

    while !frontier.is_empty() {
        let mut next_frontier = Vec::new();
        for state_id in frontier {
            for &symbol in &symbols {
                let target = goto(grammar, sets, &states[state_id], symbol);
                if target.is_empty() {
                    continue;
                }
                let existing = states
                    .indices()
                    .find(|&id| states[id] == target);
                let target_id = match existing {
                    Some(id) => id,
                    None => {
                        let id = states.push(target);
                        next_frontier.push(id);
                        id
                    }
                };
                transitions.insert((state_id, symbol), target_id);
            }
        }
        frontier = next_frontier;
    }

    tracing::debug!(
        states = states.len(),
        transitions = transitions.len(),
        "built canonical LR(1) collection"
    );

    CanonicalCollection {
        states,
        transitions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plus_lex::TokenKind;

    #[test]
    fn exactly_one_state_has_an_accept_pre_item() {
        let grammar = Grammar::plus();
        let sets = SetEngine::compute(&grammar);
        let collection = build(&grammar, &sets);

        let start_production = grammar
            .productions
            .iter()
            .find(|p| p.lhs == grammar.augmented_start)
            .unwrap();

        let accept_states: Vec<StateId> = collection
            .states
            .indices()
            .filter(|&id| {
                collection.states[id].iter().any(|(core, lookahead)| {
                    core.production == start_production.id
                        && core.dot == start_production.rhs.len()
                        && lookahead.contains(&grammar.eof)
                })
            })
            .collect();

        assert_eq!(accept_states.len(), 1, "expected exactly one accept state");
    }

    #[test]
    fn goto_on_a_symbol_the_state_does_not_expect_is_empty() {
        let grammar = Grammar::plus();
        let sets = SetEngine::compute(&grammar);
        let collection = build(&grammar, &sets);
        let initial = &collection.states[StateId::from_usize(0)];
        // The initial state never expects a bare '+' token as its very
        // first symbol — the grammar has no production beginning with it.
        let result = goto(&grammar, &sets, initial, GrammarSymbol::Terminal(TokenKind::Plus));
        assert!(result.is_empty());
    }

    #[test]
    fn canonical_collection_is_nonempty_and_finite() {
        let grammar = Grammar::plus();
        let sets = SetEngine::compute(&grammar);
        let collection = build(&grammar, &sets);
        assert!(!collection.states.is_empty());
        // Sanity ceiling: a 25-production grammar this small will never
        // legitimately need thousands of LR(1) states. A runaway fixed
        // point (a closure or goto bug) would blow past this fast.
        assert!(collection.states.len() < 500);
    }
}
