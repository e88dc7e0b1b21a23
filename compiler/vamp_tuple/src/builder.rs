//! Incremental tuple construction from source-ordered entries.
//!
//! A literal such as `Point(1, y: 2, 3)` may interleave positional and named
//! entries; the builder keeps positional entries in order, keeps named entries
//! in declaration order, and resolves the layout through a [`LayoutCache`] on
//! [`finish`](TupleBuilder::finish).

use smallvec::SmallVec;
use vamp_ir::Symbol;

use crate::{LayoutCache, Tuple, TupleEntry, TupleError};

/// Collects tuple entries before the layout is known.
#[derive(Clone, Debug)]
pub struct TupleBuilder<T> {
    tag: Option<Symbol>,
    positional: Vec<T>,
    named: Vec<(Symbol, T)>,
}

impl<T> TupleBuilder<T> {
    /// An untagged builder.
    pub fn new() -> Self {
        TupleBuilder {
            tag: None,
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    /// A builder for a tag-prefixed constructor call such as `Person(...)`.
    pub fn tagged(tag: Symbol) -> Self {
        TupleBuilder {
            tag: Some(tag),
            ..Self::new()
        }
    }

    /// Append a positional entry.
    pub fn push(&mut self, value: T) -> &mut Self {
        self.positional.push(value);
        self
    }

    /// Append a named entry. Duplicates are reported by `finish`.
    pub fn insert(&mut self, field: Symbol, value: T) -> &mut Self {
        self.named.push((field, value));
        self
    }

    /// Append an entry of either kind.
    pub fn entry(&mut self, entry: TupleEntry<T>) -> &mut Self {
        match entry {
            TupleEntry::Pos(value) => self.push(value),
            TupleEntry::Named(field, value) => self.insert(field, value),
        }
    }

    /// Number of entries collected so far.
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// Check if no entries were collected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve the layout and build the tuple.
    ///
    /// Fails with `DuplicateField` if a named entry was given twice.
    pub fn finish(self, cache: &LayoutCache) -> Result<Tuple<T>, TupleError> {
        let symbols: SmallVec<[Symbol; 8]> = self.named.iter().map(|&(field, _)| field).collect();
        let layout = cache.construct(self.positional.len(), &symbols, self.tag)?;
        Tuple::construct(layout, self.positional, self.named)
    }
}

impl<T> Default for TupleBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<TupleEntry<T>> for TupleBuilder<T> {
    fn extend<I: IntoIterator<Item = TupleEntry<T>>>(&mut self, entries: I) {
        for entry in entries {
            self.entry(entry);
        }
    }
}

impl<T> FromIterator<TupleEntry<T>> for TupleBuilder<T> {
    fn from_iter<I: IntoIterator<Item = TupleEntry<T>>>(entries: I) -> Self {
        let mut builder = TupleBuilder::new();
        builder.extend(entries);
        builder
    }
}
