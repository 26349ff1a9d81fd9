//! LR(1) items and item sets.
//!
//! An item pairs a production with a dot position (how much of its
//! right-hand side has been recognized so far) and a lookahead set (which
//! terminals are permitted to follow once the production reduces). Within
//! one state, two items sharing a core (production, dot) are folded into
//! a single entry whose lookahead set is their union — see [`crate::lr1`]
//! for where that merge happens and why it never crosses state
//! boundaries.

use std::collections::BTreeMap;

use plus_util::Idx;

use crate::grammar::{GrammarSymbol, ProductionId};
use crate::sets::TerminalSet;

/// Dense id of a canonical-collection state, assigned in breadth-first
/// discovery order. State 0 is always the initial state (the closure of
/// `S' -> .Program, {$}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

impl Idx for StateId {
    fn from_usize(idx: usize) -> Self {
        StateId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The part of an item that participates in core identity/merging: which
/// production, and how far the dot has advanced through its right-hand
/// side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemCore {
    pub production: ProductionId,
    pub dot: usize,
}

/// An item set (canonically, a parser state before GOTO dedup): a map
/// from item core to its accumulated lookahead set. Using a `BTreeMap`
/// keeps iteration order deterministic (sorted by `(production, dot)`),
/// which matters for reproducible `--dump-tables` output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemSet {
    items: BTreeMap<ItemCore, TerminalSet>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `lookahead` into the entry for `core`, returning whether
    /// the item set changed (a new core, or a lookahead set that grew).
    pub fn insert(&mut self, core: ItemCore, lookahead: TerminalSet) -> bool {
        match self.items.get_mut(&core) {
            Some(existing) => crate::sets::union_into(existing, &lookahead),
            None => {
                self.items.insert(core, lookahead);
                true
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemCore, &TerminalSet)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn lookahead_of(&self, core: &ItemCore) -> Option<&TerminalSet> {
        self.items.get(core)
    }
}

/// The grammar symbol immediately after an item's dot, if any (`None`
/// means the item is complete: the dot sits at the end of the
/// production's right-hand side).
pub fn symbol_after_dot(
    grammar: &crate::grammar::Grammar,
    core: &ItemCore,
) -> Option<GrammarSymbol> {
    let production = grammar.production(core.production);
    production.rhs.get(core.dot).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserting_a_new_core_always_changes_the_set() {
        let mut set = ItemSet::new();
        let core = ItemCore {
            production: ProductionId::from_usize(0),
            dot: 0,
        };
        assert!(set.insert(core, TerminalSet::default()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn merging_lookahead_into_an_existing_core_does_not_duplicate_it() {
        let mut set = ItemSet::new();
        let core = ItemCore {
            production: ProductionId::from_usize(0),
            dot: 0,
        };
        set.insert(core, TerminalSet::default());
        set.insert(core, TerminalSet::default());
        assert_eq!(set.len(), 1);
    }
}
