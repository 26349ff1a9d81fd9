//! Variable environment: a single, flat, insertion-ordered map from
//! declared name to its current `BigInt` value.
//!
//! PLUS has exactly one scope for the lifetime of a program — declaring
//! inside a loop body does not create a fresh binding per iteration (see
//! [`crate::evaluator`]'s loop-evaluation docs) — so `Environment` is
//! nothing more than a name table with declare-once semantics.

use indexmap::IndexMap;
use plus_util::BigInt;

/// The interpreter's sole variable store. Kept as `IndexMap` (rather than
/// a plain `HashMap`) so that a future `--dump-ast`-style "dump final
/// environment" debug aid, if ever added, could report bindings in
/// declaration order; nothing in the evaluator's semantics depends on
/// the ordering today.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: IndexMap<String, BigInt>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    /// Declares `name` with an initial value of zero. Returns `false`
    /// (and leaves the environment untouched) if `name` is already
    /// declared.
    pub fn declare(&mut self, name: &str) -> bool {
        if self.bindings.contains_key(name) {
            return false;
        }
        self.bindings.insert(name.to_string(), BigInt::zero());
        true
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&BigInt> {
        self.bindings.get(name)
    }

    /// Overwrites `name`'s value. Panics if `name` was never declared —
    /// callers (the evaluator) always check [`Environment::is_declared`]
    /// first and turn an undeclared name into `EvalError::UndeclaredIdentifier`
    /// before ever reaching this.
    pub fn set(&mut self, name: &str, value: BigInt) {
        let slot = self
            .bindings
            .get_mut(name)
            .expect("set() is only called after is_declared() has been checked");
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_declaration_starts_at_zero() {
        let mut env = Environment::new();
        assert!(env.declare("x"));
        assert_eq!(env.get("x"), Some(&BigInt::zero()));
    }

    #[test]
    fn redeclaration_is_rejected() {
        let mut env = Environment::new();
        assert!(env.declare("x"));
        assert!(!env.declare("x"));
    }

    #[test]
    fn set_overwrites_an_existing_binding() {
        let mut env = Environment::new();
        env.declare("x");
        env.set("x", BigInt::from_i64(42));
        assert_eq!(env.get("x"), Some(&BigInt::from_i64(42)));
    }
}
