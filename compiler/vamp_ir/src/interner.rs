//! String interner for symbol storage.
//!
//! Provides O(1) interning and lookup with thread-safe insert-if-absent.
//! Ids are dense and assigned in first-occurrence order, so every caller that
//! interns the same name gets the same `Symbol`, regardless of which thread
//! got there first.

use super::Symbol;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// The id space (`u32`) is exhausted.
    #[error("symbol interner exceeded capacity: {count} strings, max is {max}", max = u32::MAX)]
    Overflow { count: usize },
}

/// Interned strings and their reverse mapping.
struct InternTable {
    /// Map from string content to symbol.
    map: FxHashMap<&'static str, Symbol>,
    /// Storage for string contents, indexed by symbol id.
    strings: Vec<&'static str>,
}

impl InternTable {
    fn with_empty() -> Self {
        let mut table = InternTable {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        let empty: &'static str = "";
        table.map.insert(empty, Symbol::EMPTY);
        table.strings.push(empty);
        table
    }

    fn insert(&mut self, leaked: &'static str) -> Result<Symbol, InternError> {
        let raw = u32::try_from(self.strings.len()).map_err(|_| InternError::Overflow {
            count: self.strings.len(),
        })?;
        let symbol = Symbol::from_raw(raw);
        self.strings.push(leaked);
        self.map.insert(leaked, symbol);
        Ok(symbol)
    }
}

/// String interner with concurrent access.
///
/// # Thread Safety
/// A single `RwLock` guards the table. Lookups of already-interned names only
/// take the read lock; insertion re-checks under the write lock so concurrent
/// interning of one name never allocates two ids.
pub struct SymbolInterner {
    table: RwLock<InternTable>,
}

impl SymbolInterner {
    /// Create a new interner with the empty string pre-interned as
    /// [`Symbol::EMPTY`].
    pub fn new() -> Self {
        SymbolInterner {
            table: RwLock::new(InternTable::with_empty()),
        }
    }

    /// Try to intern a string, returning its Symbol or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Symbol, InternError> {
        // Fast path: already interned
        if let Some(&symbol) = self.table.read().map.get(s) {
            return Ok(symbol);
        }

        let mut guard = self.table.write();

        // Double-check after acquiring write lock
        if let Some(&symbol) = guard.map.get(s) {
            return Ok(symbol);
        }

        // Leak the string to get 'static lifetime
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.insert(leaked)
    }

    /// Intern a string, returning its Symbol.
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32::MAX` strings.
    /// Use `try_intern` for fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Symbol {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Intern an owned String without copying it again.
    pub fn try_intern_owned(&self, s: String) -> Result<Symbol, InternError> {
        if let Some(&symbol) = self.table.read().map.get(s.as_str()) {
            return Ok(symbol);
        }

        let mut guard = self.table.write();
        if let Some(&symbol) = guard.map.get(s.as_str()) {
            return Ok(symbol);
        }

        let leaked: &'static str = Box::leak(s.into_boxed_str());
        guard.insert(leaked)
    }

    /// Look up the symbol for a string without interning it.
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.table.read().map.get(s).copied()
    }

    /// Look up the string for a Symbol.
    ///
    /// # Panics
    /// Panics if `symbol` was not produced by this interner.
    pub fn lookup(&self, symbol: Symbol) -> &str {
        self.lookup_static(symbol)
    }

    /// Look up the string for a Symbol with a `'static` lifetime.
    ///
    /// Interned strings are leaked and never deallocated.
    pub fn lookup_static(&self, symbol: Symbol) -> &'static str {
        self.table.read().strings[symbol.index()]
    }

    /// Get the number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if the interner only holds the empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for SymbolInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SymbolInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolInterner")
            .field("len", &self.len())
            .finish()
    }
}

/// Trait for looking up interned symbol names.
///
/// Lets display and encoding code accept any lookup source without depending
/// on `SymbolInterner` directly.
pub trait SymbolLookup {
    /// Look up the string for an interned symbol.
    fn lookup(&self, symbol: Symbol) -> &str;
}

impl SymbolLookup for SymbolInterner {
    fn lookup(&self, symbol: Symbol) -> &str {
        SymbolInterner::lookup(self, symbol)
    }
}

impl SymbolLookup for SharedInterner {
    fn lookup(&self, symbol: Symbol) -> &str {
        self.0.lookup(symbol)
    }
}

/// Shared interner for interning across compiler phases and threads.
///
/// Created once by the pipeline context and cloned into each phase; every
/// clone observes the same table.
#[derive(Clone, Default, Debug)]
pub struct SharedInterner(Arc<SymbolInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(SymbolInterner::new()))
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = SymbolInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
