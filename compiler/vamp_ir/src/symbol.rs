//! Interned name identifier.

use std::fmt;

/// Interned name identifier.
///
/// Ids are handed out densely and in first-occurrence order by a
/// [`SymbolInterner`](crate::SymbolInterner), so ordering two symbols compares
/// the order in which their names were first seen. Equality and hashing use the
/// id only.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Symbol(u32);

impl Symbol {
    /// Pre-interned empty string.
    pub const EMPTY: Symbol = Symbol(0);

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Symbol(raw)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the interner's string table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::EMPTY
    }
}
