//! Nullable/FIRST/FOLLOW fixed-point computation.
//!
//! All three are computed by repeatedly sweeping every production and
//! applying its inference rule until a full sweep changes nothing. This
//! is the textbook worklist-free fixed point: simple to verify correct,
//! and the PLUS grammar is small enough (25 productions, 14 nonterminals)
//! that the quadratic-ish sweep cost never matters.

use plus_lex::TokenKind;
use plus_util::IndexVec;
use rustc_hash::FxHashSet;

use crate::grammar::{Grammar, GrammarSymbol, NonTerminalId};

/// A set of terminals. Small and value-typed enough that cloning is cheap;
/// every lookahead set and FIRST/FOLLOW entry in the toolkit is one of
/// these.
pub type TerminalSet = FxHashSet<TokenKind>;

/// Unions `source` into `target`, returning whether `target` changed.
/// Fixed-point loops (FIRST, FOLLOW, and LR(1) item-set closure) all
/// terminate on the first sweep where every call to this returns `false`.
pub fn union_into(target: &mut TerminalSet, source: &TerminalSet) -> bool {
    let before = target.len();
    target.extend(source.iter().copied());
    target.len() != before
}

pub struct SetEngine {
    pub nullable: IndexVec<NonTerminalId, bool>,
    pub first: IndexVec<NonTerminalId, TerminalSet>,
    pub follow: IndexVec<NonTerminalId, TerminalSet>,
}

impl SetEngine {
    pub fn compute(grammar: &Grammar) -> Self {
        let nullable = compute_nullable(grammar);
        let first = compute_first(grammar, &nullable);
        let follow = compute_follow(grammar, &nullable, &first);
        SetEngine {
            nullable,
            first,
            follow,
        }
    }

    /// FIRST of a symbol sequence followed by a known trailing lookahead
    /// set, used both when computing FOLLOW (trailing = FOLLOW(lhs)) and
    /// when computing an LR(1) item's propagated lookahead (trailing =
    /// the item's own lookahead set). If every symbol in `symbols` is
    /// nullable, `trailing` is folded in too.
    pub fn first_of_sequence(&self, symbols: &[GrammarSymbol], trailing: &TerminalSet) -> TerminalSet {
        let mut result = TerminalSet::default();
        let mut all_nullable_so_far = true;
        for symbol in symbols {
            match symbol {
                GrammarSymbol::Terminal(t) => {
                    result.insert(*t);
                    all_nullable_so_far = false;
                    break;
                }
                GrammarSymbol::NonTerminal(nt) => {
                    result.extend(self.first[*nt].iter().copied());
                    if !self.nullable[*nt] {
                        all_nullable_so_far = false;
                        break;
                    }
                }
            }
        }
        if all_nullable_so_far {
            result.extend(trailing.iter().copied());
        }
        result
    }
}

fn compute_nullable(grammar: &Grammar) -> IndexVec<NonTerminalId, bool> {
    let mut nullable: IndexVec<NonTerminalId, bool> =
        (0..grammar.nonterminal_count()).map(|_| false).collect();

    // Every production in this grammar has a nonempty right-hand side
    // (PLUS has no epsilon productions), so nullability here can only
    // ever arise transitively through a chain of single-nonterminal
    // right-hand sides. None exist in the shipped grammar, but the loop
    // is written generally rather than special-cased to "always false".
    loop {
        let mut changed = false;
        for production in grammar.productions.iter() {
            if nullable[production.lhs] {
                continue;
            }
            let is_nullable = production.rhs.iter().all(|symbol| match symbol {
                GrammarSymbol::Terminal(_) => false,
                GrammarSymbol::NonTerminal(nt) => nullable[*nt],
            });
            if is_nullable {
                nullable[production.lhs] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    nullable
}

fn compute_first(
    grammar: &Grammar,
    nullable: &IndexVec<NonTerminalId, bool>,
) -> IndexVec<NonTerminalId, TerminalSet> {
    let mut first: IndexVec<NonTerminalId, TerminalSet> = (0..grammar.nonterminal_count())
        .map(|_| TerminalSet::default())
        .collect();

    loop {
        let mut changed = false;
        for production in grammar.productions.iter() {
            for symbol in &production.rhs {
                match symbol {
                    GrammarSymbol::Terminal(t) => {
                        changed |= first[production.lhs].insert(*t);
                        break;
                    }
                    GrammarSymbol::NonTerminal(nt) => {
                        let addition = first[*nt].clone();
                        changed |= union_into(&mut first[production.lhs], &addition);
                        if !nullable[*nt] {
                            break;
                        }
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
    first
}

fn compute_follow(
    grammar: &Grammar,
    nullable: &IndexVec<NonTerminalId, bool>,
    first: &IndexVec<NonTerminalId, TerminalSet>,
) -> IndexVec<NonTerminalId, TerminalSet> {
    let mut follow: IndexVec<NonTerminalId, TerminalSet> = (0..grammar.nonterminal_count())
        .map(|_| TerminalSet::default())
        .collect();
    follow[grammar.start].insert(grammar.eof);

    loop {
        let mut changed = false;
        for production in grammar.productions.iter() {
            for (i, symbol) in production.rhs.iter().enumerate() {
                let GrammarSymbol::NonTerminal(b) = symbol else {
                    continue;
                };
                let rest = &production.rhs[i + 1..];

                let mut first_of_rest = TerminalSet::default();
                let mut rest_is_nullable = true;
                for sym in rest {
                    match sym {
                        GrammarSymbol::Terminal(t) => {
                            first_of_rest.insert(*t);
                            rest_is_nullable = false;
                            break;
                        }
                        GrammarSymbol::NonTerminal(c) => {
                            first_of_rest.extend(first[*c].iter().copied());
                            if !nullable[*c] {
                                rest_is_nullable = false;
                                break;
                            }
                        }
                    }
                }

                changed |= union_into(&mut follow[*b], &first_of_rest);
                if rest_is_nullable {
                    let addition = follow[production.lhs].clone();
                    changed |= union_into(&mut follow[*b], &addition);
                }
            }
        }
        if !changed {
            break;
        }
    }
    follow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_symbol_follow_contains_eof() {
        let grammar = Grammar::plus();
        let engine = SetEngine::compute(&grammar);
        assert!(engine.follow[grammar.start].contains(&TokenKind::Eof));
    }

    #[test]
    fn first_of_statement_is_nonempty_and_excludes_eof() {
        let grammar = Grammar::plus();
        let engine = SetEngine::compute(&grammar);
        // Statement is nonterminal id 3 by declaration order in Grammar::plus().
        let statement = grammar
            .nonterminal_names
            .indices()
            .find(|&id| grammar.nonterminal_name(id) == "Statement")
            .unwrap();
        assert!(!engine.first[statement].is_empty());
        assert!(!engine.first[statement].contains(&TokenKind::Eof));
    }

    #[test]
    fn nothing_in_plus_is_nullable() {
        let grammar = Grammar::plus();
        let engine = SetEngine::compute(&grammar);
        assert!(engine.nullable.iter().all(|&n| !n));
    }
}

#[cfg(test)]
mod quickcheck_tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    /// Sanity property for [`union_into`]: unioning a set into itself never
    /// reports a change, and unioning always grows (never shrinks) the
    /// target — the monotonicity the FIRST/FOLLOW/closure fixed-point
    /// loops depend on to guarantee termination.
    #[quickcheck]
    fn union_into_is_monotonic(a: Vec<u8>, b: Vec<u8>) -> TestResult {
        use TokenKind::*;
        const KINDS: [TokenKind; 6] = [Write, And, Repeat, Newline, Times, NumberKw];
        let to_set = |v: &[u8]| -> TerminalSet {
            v.iter().map(|b| KINDS[*b as usize % KINDS.len()]).collect()
        };
        let mut target = to_set(&a);
        let before_len = target.len();
        let source = to_set(&b);
        union_into(&mut target, &source);
        TestResult::from_bool(target.len() >= before_len && source.is_subset(&target))
    }
}
