//! Tuple layouts: the shape of a tuple independent of its values.
//!
//! A layout records the positional arity P, the named fields in declaration
//! order (occupying slots P..P+M), and an optional tag. Two layouts are equal
//! when P, tag and the *set* of named symbols agree; declaration order only
//! affects iteration and printing.

mod cache;
mod index;

use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;
use vamp_ir::{Symbol, SymbolLookup};

use crate::TupleError;

pub use cache::{LayoutCache, SharedLayoutCache};
pub use index::LayoutIndex;

/// Canonical identity of a layout: `(P, tag, ascending named ids)`.
///
/// Used as the layout cache key, so shapes that differ only in declaration
/// order share one `Layout`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    positional_count: usize,
    tag: Option<Symbol>,
    named: SmallVec<[Symbol; 8]>,
}

impl LayoutKey {
    /// Compute the canonical key, rejecting duplicate named symbols.
    pub fn new(
        positional_count: usize,
        named: &[Symbol],
        tag: Option<Symbol>,
    ) -> Result<Self, TupleError> {
        let mut sorted: SmallVec<[Symbol; 8]> = named.iter().copied().collect();
        sorted.sort_unstable();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(TupleError::DuplicateField { field: pair[0] });
        }
        Ok(LayoutKey {
            positional_count,
            tag,
            named: sorted,
        })
    }

    /// Positional arity.
    pub fn positional_count(&self) -> usize {
        self.positional_count
    }

    /// Tag, if any.
    pub fn tag(&self) -> Option<Symbol> {
        self.tag
    }

    /// Named symbols in ascending id order.
    pub fn named(&self) -> &[Symbol] {
        &self.named
    }
}

/// The shape of a tuple.
///
/// Immutable once built. Obtain shared instances through
/// [`LayoutCache::construct`]; [`Layout::new`] builds a standalone layout that
/// still compares structurally equal to cached ones.
#[derive(Clone)]
pub struct Layout {
    positional_count: usize,
    /// Named fields in declaration order; field `i` lives in slot
    /// `positional_count + i`.
    named: Box<[Symbol]>,
    tag: Option<Symbol>,
    index: LayoutIndex,
}

impl Layout {
    /// Build a layout.
    ///
    /// Fails with `DuplicateField` if a named symbol repeats.
    pub fn new(
        positional_count: usize,
        named: &[Symbol],
        tag: Option<Symbol>,
    ) -> Result<Self, TupleError> {
        let index = LayoutIndex::build(positional_count, named)?;
        Ok(Layout {
            positional_count,
            named: named.into(),
            tag,
            index,
        })
    }

    /// A positional-only, untagged layout.
    pub fn positional(positional_count: usize) -> Self {
        Layout {
            positional_count,
            named: Box::default(),
            tag: None,
            index: LayoutIndex::default(),
        }
    }

    /// Positional arity P.
    #[inline]
    pub fn positional_count(&self) -> usize {
        self.positional_count
    }

    /// Number of named fields M.
    #[inline]
    pub fn named_count(&self) -> usize {
        self.named.len()
    }

    /// Total slot count P + M.
    #[inline]
    pub fn len(&self) -> usize {
        self.positional_count + self.named.len()
    }

    /// Check if the layout has no slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The tag, if any.
    #[inline]
    pub fn tag(&self) -> Option<Symbol> {
        self.tag
    }

    /// Named fields in declaration order.
    #[inline]
    pub fn named_fields(&self) -> &[Symbol] {
        &self.named
    }

    /// The symbol index over named fields.
    #[inline]
    pub fn index(&self) -> &LayoutIndex {
        &self.index
    }

    /// Storage slot of a named field.
    #[inline]
    pub fn slot_of(&self, symbol: Symbol) -> Option<usize> {
        self.index.lookup(symbol)
    }

    /// Check whether the layout declares a named field.
    #[inline]
    pub fn has_field(&self, symbol: Symbol) -> bool {
        self.index.contains(symbol)
    }

    /// The canonical key of this layout.
    pub fn key(&self) -> LayoutKey {
        LayoutKey {
            positional_count: self.positional_count,
            tag: self.tag,
            named: self.index.symbols().collect(),
        }
    }

    /// Render the shape, e.g. `Point(_, x:, y:)`.
    pub fn display<'a, L: SymbolLookup>(&'a self, lookup: &'a L) -> LayoutDisplay<'a, L> {
        LayoutDisplay {
            layout: self,
            lookup,
        }
    }
}

impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.positional_count == other.positional_count
                && self.tag == other.tag
                && self.index.same_symbols(&other.index))
    }
}

impl Eq for Layout {}

impl Hash for Layout {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.positional_count.hash(state);
        self.tag.hash(state);
        for symbol in self.index.symbols() {
            symbol.hash(state);
        }
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("positional_count", &self.positional_count)
            .field("named", &self.named)
            .field("tag", &self.tag)
            .finish()
    }
}

/// Display adapter for [`Layout`].
pub struct LayoutDisplay<'a, L> {
    layout: &'a Layout,
    lookup: &'a L,
}

impl<L: SymbolLookup> fmt::Display for LayoutDisplay<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = self.layout.tag {
            f.write_str(self.lookup.lookup(tag))?;
        }
        f.write_str("(")?;
        let positional = std::iter::repeat("_".to_owned()).take(self.layout.positional_count);
        let named = self
            .layout
            .named
            .iter()
            .map(|&symbol| format!("{}:", self.lookup.lookup(symbol)));
        for (i, item) in positional.chain(named).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&item)?;
        }
        f.write_str(")")
    }
}
