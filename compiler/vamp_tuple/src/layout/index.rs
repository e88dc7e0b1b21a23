//! Symbol-keyed index over a layout's named fields.

use vamp_ir::Symbol;

use crate::TupleError;

/// Sorted `(Symbol, slot)` pairs for O(log n) field lookup.
///
/// Layouts never change after construction, so a sorted boxed slice with
/// binary search replaces a tree or hash map. Iteration is always in ascending
/// symbol-id order, independent of declaration order, which is what makes
/// structural comparison of named fields deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutIndex {
    entries: Box<[(Symbol, usize)]>,
}

impl LayoutIndex {
    /// Build the index for named fields declared after `positional_count`
    /// positional slots.
    ///
    /// Fails with `DuplicateField` if a symbol repeats.
    pub fn build(positional_count: usize, named: &[Symbol]) -> Result<Self, TupleError> {
        let mut entries: Vec<(Symbol, usize)> = named
            .iter()
            .enumerate()
            .map(|(i, &symbol)| (symbol, positional_count + i))
            .collect();
        entries.sort_unstable_by_key(|&(symbol, _)| symbol);

        if let Some(pair) = entries.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(TupleError::DuplicateField { field: pair[0].0 });
        }

        Ok(LayoutIndex {
            entries: entries.into_boxed_slice(),
        })
    }

    /// Storage slot of a named field.
    #[inline]
    pub fn lookup(&self, symbol: Symbol) -> Option<usize> {
        self.entries
            .binary_search_by_key(&symbol, |&(s, _)| s)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Check whether a named field exists.
    #[inline]
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.lookup(symbol).is_some()
    }

    /// Iterate `(symbol, slot)` in ascending symbol-id order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Symbol, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Iterate named symbols in ascending id order.
    pub fn symbols(&self) -> impl ExactSizeIterator<Item = Symbol> + '_ {
        self.entries.iter().map(|&(symbol, _)| symbol)
    }

    /// Number of named fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the layout has no named fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if two indices cover the same symbol set (slots may differ).
    pub fn same_symbols(&self, other: &LayoutIndex) -> bool {
        self.len() == other.len() && self.symbols().eq(other.symbols())
    }
}
