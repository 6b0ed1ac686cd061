//! Name tables for states and tags.
//!
//! A compiled graph refers to states and tags by dense index. The same indices
//! are the `stateIdx`/`tagIdx` values exchanged with other engines, so an index
//! never changes once it is handed out.

use std::collections::BTreeMap;

use indexmap::IndexSet;

/// Dense index of a name in an [`Interner`]. Ordered by first appearance.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Symbol for an index received from outside, e.g. a flat evaluation result.
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

/// Append-only set of names, each identified by its position.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    names: IndexSet<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `name`, adding it at the end on first sight.
    pub fn intern(&mut self, name: &str) -> Symbol {
        if let Some(sym) = self.get(name) {
            return sym;
        }
        let (index, _) = self.names.insert_full(name.to_owned());
        Symbol(index as u32)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.names.get_index_of(name).map(|i| Symbol(i as u32))
    }

    /// # Panics
    /// Panics if `sym` did not come from this table.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.names[sym.as_usize()]
    }

    #[inline]
    pub fn try_resolve(&self, sym: Symbol) -> Option<&str> {
        self.names.get_index(sym.as_usize()).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (Symbol(i as u32), name.as_str()))
    }

    /// Index → name map in the shape other engines report names in.
    pub fn table(&self) -> BTreeMap<u32, String> {
        self.iter()
            .map(|(sym, name)| (sym.as_u32(), name.to_owned()))
            .collect()
    }
}
