//! Keyword-aware symbol table.
//!
//! An insertion-ordered table, keyed by name, seeded at construction with
//! the language's keywords in a fixed canonical order (`and`, `write`,
//! `repeat`, `newline`, `times`, `number`). Identifiers are appended the
//! first time the lexer sees them; the insertion index becomes the token
//! payload for `Identifier` tokens.

use indexmap::IndexMap;

use crate::token::TokenKind;

/// Dense id of an entry in a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single entry: the name, whether it denotes a keyword, and (for
/// keywords only) which token kind it lexes as.
#[derive(Debug, Clone)]
pub struct SymbolEntry {
    pub name: String,
    pub is_keyword: bool,
    keyword_kind: Option<TokenKind>,
}

pub struct SymbolTable {
    entries: IndexMap<String, SymbolEntry>,
}

/// Keywords seeded into every fresh [`SymbolTable`], in canonical order.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("and", TokenKind::And),
    ("write", TokenKind::Write),
    ("repeat", TokenKind::Repeat),
    ("newline", TokenKind::Newline),
    ("times", TokenKind::Times),
    ("number", TokenKind::NumberKw),
];

impl SymbolTable {
    pub fn new() -> Self {
        let mut entries = IndexMap::new();
        for &(name, kind) in KEYWORDS {
            entries.insert(
                name.to_string(),
                SymbolEntry {
                    name: name.to_string(),
                    is_keyword: true,
                    keyword_kind: Some(kind),
                },
            );
        }
        Self { entries }
    }

    /// Looks up `name`, inserting a fresh identifier entry on first sight.
    /// Returns the entry's id and, if it is a keyword, the token kind it
    /// should lex as.
    pub fn intern(&mut self, name: &str) -> (SymbolId, Option<TokenKind>) {
        if let Some(index) = self.entries.get_index_of(name) {
            let kind = self.entries[index].keyword_kind.clone();
            return (SymbolId(index as u32), kind);
        }
        let (index, _) = self.entries.insert_full(
            name.to_string(),
            SymbolEntry {
                name: name.to_string(),
                is_keyword: false,
                keyword_kind: None,
            },
        );
        (SymbolId(index as u32), None)
    }

    pub fn entry(&self, id: SymbolId) -> &SymbolEntry {
        self.entries
            .get_index(id.index())
            .map(|(_, entry)| entry)
            .expect("SymbolId from this table is always valid")
    }

    pub fn name(&self, id: SymbolId) -> &str {
        &self.entry(id).name
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_seeded_and_never_relexed_as_identifiers() {
        let mut table = SymbolTable::new();
        for &(name, kind) in KEYWORDS {
            let (_, lexed_kind) = table.intern(name);
            assert_eq!(lexed_kind, Some(kind));
        }
    }

    #[test]
    fn identifiers_are_appended_on_first_sight() {
        let mut table = SymbolTable::new();
        let (id1, kind1) = table.intern("x");
        assert_eq!(kind1, None);
        let (id2, _) = table.intern("x");
        assert_eq!(id1, id2);
        let (id3, _) = table.intern("y");
        assert_ne!(id1, id3);
        assert_eq!(table.name(id3), "y");
    }
}
