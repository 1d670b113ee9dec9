//! Interned alphabet symbols.

use std::collections::HashMap;
use std::fmt;

/// A unique identifier for a symbol within one [`SymbolTable`].
pub type SymbolId = u32;

/// An element of a grammar's alphabet.
///
/// Symbols are cheap `Copy` handles. Two symbols from the same table are equal
/// exactly when they were interned from the same character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    id: SymbolId,
    ch: char,
}

impl Symbol {
    /// Index of this symbol in its table. Dense, starting at zero.
    pub fn id(self) -> SymbolId {
        self.id
    }

    /// The source character this symbol was interned from.
    pub fn as_char(self) -> char {
        self.ch
    }

    pub(crate) fn index(self) -> usize {
        self.id as usize
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ch)
    }
}

/// The alphabet of a grammar: maps characters to their unique [`Symbol`].
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    by_char: HashMap<char, Symbol>,
    chars: Vec<char>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol for `ch`, creating it on first reference.
    pub fn intern(&mut self, ch: char) -> Symbol {
        if let Some(sym) = self.by_char.get(&ch) {
            return *sym;
        }
        // At most 0x110000 distinct chars exist, so the id always fits.
        let sym = Symbol {
            id: self.chars.len() as SymbolId,
            ch,
        };
        self.chars.push(ch);
        self.by_char.insert(ch, sym);
        sym
    }

    /// Interns every character of `s`, in order.
    pub fn intern_str(&mut self, s: &str) -> Vec<Symbol> {
        s.chars().map(|c| self.intern(c)).collect()
    }

    /// Looks up an existing symbol without creating one.
    pub fn resolve(&self, ch: char) -> Option<Symbol> {
        self.by_char.get(&ch).copied()
    }

    /// The character `sym` was interned from, if it belongs to this table.
    pub fn char_of(&self, sym: Symbol) -> Option<char> {
        self.chars.get(sym.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Iterates symbols in creation order.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.chars.iter().enumerate().map(|(id, &ch)| Symbol {
            id: id as SymbolId,
            ch,
        })
    }
}
