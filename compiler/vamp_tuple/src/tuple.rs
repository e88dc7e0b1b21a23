//! The tuple container: a shared layout plus an aligned value array.
//!
//! Storage is `[positional..., named...]` with named values in the layout's
//! declaration order. Positional members are reachable by index, named ones
//! only by symbol.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::Arc;

use smallvec::SmallVec;
use vamp_ir::{Symbol, SymbolLookup};

use crate::{Layout, LayoutCache, TupleError};

/// Address of a tuple member.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TupleKey {
    /// Positional member by index.
    Index(usize),
    /// Named member by symbol.
    Field(Symbol),
}

impl From<usize> for TupleKey {
    fn from(index: usize) -> Self {
        TupleKey::Index(index)
    }
}

impl From<Symbol> for TupleKey {
    fn from(symbol: Symbol) -> Self {
        TupleKey::Field(symbol)
    }
}

/// A single positional or named tuple entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TupleEntry<T> {
    /// A positional entry.
    Pos(T),
    /// A named entry.
    Named(Symbol, T),
}

/// Runtime composite value, or compile-time product type when `T` is a type.
///
/// Immutable after construction. "Updates" copy the value array and share the
/// layout (see [`Tuple::with_updated`]).
#[derive(Clone)]
pub struct Tuple<T> {
    layout: Arc<Layout>,
    values: Box<[T]>,
}

impl<T> Tuple<T> {
    /// Construct a tuple for `layout`.
    ///
    /// # Errors
    /// - `ArityMismatch` if `positional.len()` differs from the layout's P
    /// - `UnknownField` if a named value's symbol is not in the layout
    /// - `DuplicateField` if a named value is supplied twice
    /// - `MissingField` if a layout field has no value
    pub fn construct(
        layout: Arc<Layout>,
        positional: Vec<T>,
        named: impl IntoIterator<Item = (Symbol, T)>,
    ) -> Result<Self, TupleError> {
        let positional_count = layout.positional_count();
        if positional.len() != positional_count {
            return Err(TupleError::ArityMismatch {
                expected: positional_count,
                found: positional.len(),
            });
        }

        let mut slots: SmallVec<[Option<T>; 8]> =
            std::iter::repeat_with(|| None).take(layout.named_count()).collect();
        for (field, value) in named {
            let slot = layout
                .slot_of(field)
                .ok_or(TupleError::UnknownField { field })?;
            let entry = &mut slots[slot - positional_count];
            if entry.is_some() {
                return Err(TupleError::DuplicateField { field });
            }
            *entry = Some(value);
        }

        let mut values = positional;
        values.reserve_exact(slots.len());
        for (slot, &field) in slots.into_iter().zip(layout.named_fields()) {
            let Some(value) = slot else {
                return Err(TupleError::MissingField { field });
            };
            values.push(value);
        }

        Ok(Tuple {
            layout,
            values: values.into_boxed_slice(),
        })
    }

    /// Construct a positional-only tuple on an existing positional layout.
    ///
    /// Equivalent to `construct(layout, values, [])`.
    pub fn from_positional(layout: Arc<Layout>, values: Vec<T>) -> Result<Self, TupleError> {
        Self::construct(layout, values, std::iter::empty())
    }

    /// The tuple's layout.
    #[inline]
    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// The tag, if any.
    #[inline]
    pub fn tag(&self) -> Option<Symbol> {
        self.layout.tag()
    }

    /// Total member count (positional + named).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the tuple has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Positional arity.
    #[inline]
    pub fn positional_count(&self) -> usize {
        self.layout.positional_count()
    }

    /// Get a positional member.
    ///
    /// Only `0..positional_count` is valid; named slots are never reachable by
    /// index even though they are stored after the positional ones.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T, TupleError> {
        self.at(index).ok_or(TupleError::IndexOutOfRange {
            index,
            len: self.positional_count(),
        })
    }

    /// Get a named member.
    #[inline]
    pub fn get_named(&self, field: Symbol) -> Result<&T, TupleError> {
        self.field(field).ok_or(TupleError::UnknownField { field })
    }

    /// Get a member by either address.
    pub fn get_key(&self, key: impl Into<TupleKey>) -> Result<&T, TupleError> {
        match key.into() {
            TupleKey::Index(index) => self.get(index),
            TupleKey::Field(field) => self.get_named(field),
        }
    }

    /// Positional member, or `None` when out of range.
    #[inline]
    pub fn at(&self, index: usize) -> Option<&T> {
        if index < self.positional_count() {
            self.values.get(index)
        } else {
            None
        }
    }

    /// Named member, or `None` when the layout lacks the field.
    #[inline]
    pub fn field(&self, field: Symbol) -> Option<&T> {
        self.layout.slot_of(field).map(|slot| &self.values[slot])
    }

    /// Positional members in order.
    #[inline]
    pub fn positional(&self) -> &[T] {
        &self.values[..self.positional_count()]
    }

    /// Named members in declaration order.
    pub fn named(&self) -> impl ExactSizeIterator<Item = (Symbol, &T)> + '_ {
        self.layout
            .named_fields()
            .iter()
            .copied()
            .zip(&self.values[self.positional_count()..])
    }

    /// Named members in ascending symbol-id order.
    pub fn named_canonical(&self) -> impl ExactSizeIterator<Item = (Symbol, &T)> + '_ {
        self.layout
            .index()
            .iter()
            .map(|(symbol, slot)| (symbol, &self.values[slot]))
    }

    /// All entries: positional first, then named in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = TupleEntry<&T>> + '_ {
        self.positional()
            .iter()
            .map(TupleEntry::Pos)
            .chain(self.named().map(|(symbol, value)| TupleEntry::Named(symbol, value)))
    }

    /// Transform every member, keeping the layout.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Tuple<U> {
        Tuple {
            layout: Arc::clone(&self.layout),
            values: self.values.iter().map(f).collect(),
        }
    }

    /// Fallibly transform every member, keeping the layout.
    pub fn try_map<U, E>(&self, f: impl FnMut(&T) -> Result<U, E>) -> Result<Tuple<U>, E> {
        Ok(Tuple {
            layout: Arc::clone(&self.layout),
            values: self.values.iter().map(f).collect::<Result<_, _>>()?,
        })
    }

    /// Render as `Tag(1, 2, x: 3)`.
    pub fn display<'a, L: SymbolLookup>(&'a self, lookup: &'a L) -> TupleDisplay<'a, T, L> {
        TupleDisplay { tuple: self, lookup }
    }

    fn slot(&self, key: TupleKey) -> Result<usize, TupleError> {
        match key {
            TupleKey::Index(index) if index < self.positional_count() => Ok(index),
            TupleKey::Index(index) => Err(TupleError::IndexOutOfRange {
                index,
                len: self.positional_count(),
            }),
            TupleKey::Field(field) => self
                .layout
                .slot_of(field)
                .ok_or(TupleError::UnknownField { field }),
        }
    }
}

impl<T: Clone> Tuple<T> {
    /// A new tuple sharing this layout, differing only at `key`.
    ///
    /// The value array is copied in full; tuples are small.
    pub fn with_updated(&self, key: impl Into<TupleKey>, value: T) -> Result<Self, TupleError> {
        let slot = self.slot(key.into())?;
        let mut values = self.values.to_vec();
        values[slot] = value;
        Ok(Tuple {
            layout: Arc::clone(&self.layout),
            values: values.into_boxed_slice(),
        })
    }

    /// [`with_updated`](Self::with_updated) for a positional member.
    pub fn with_updated_at(&self, index: usize, value: T) -> Result<Self, TupleError> {
        self.with_updated(TupleKey::Index(index), value)
    }

    /// [`with_updated`](Self::with_updated) for a named member.
    pub fn with_updated_field(&self, field: Symbol, value: T) -> Result<Self, TupleError> {
        self.with_updated(TupleKey::Field(field), value)
    }

    /// Positional members in `range` as a positional-only, untagged tuple.
    pub fn slice_positional(
        &self,
        range: Range<usize>,
        cache: &LayoutCache,
    ) -> Result<Self, TupleError> {
        let values = self
            .positional()
            .get(range.clone())
            .ok_or(TupleError::IndexOutOfRange {
                index: range.end,
                len: self.positional_count(),
            })?;
        Ok(Tuple {
            layout: cache.positional(values.len()),
            values: values.into(),
        })
    }

    /// The named members `fields` as a named-only, untagged tuple.
    pub fn project_named(&self, fields: &[Symbol], cache: &LayoutCache) -> Result<Self, TupleError> {
        let layout = cache.construct(0, fields, None)?;
        // A cached layout may declare the fields in another order.
        let values = layout
            .named_fields()
            .iter()
            .map(|&field| self.get_named(field).cloned())
            .collect::<Result<Box<[T]>, _>>()?;
        Ok(Tuple { layout, values })
    }
}

/// Layout equality, then positional members in order, then named members
/// paired by symbol in ascending id order.
impl<T: PartialEq> PartialEq for Tuple<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.layout != other.layout || self.positional() != other.positional() {
            return false;
        }
        if Arc::ptr_eq(&self.layout, &other.layout) {
            return self.values == other.values;
        }
        self.named_canonical()
            .zip(other.named_canonical())
            .all(|((_, a), (_, b))| a == b)
    }
}

impl<T: Eq> Eq for Tuple<T> {}

impl<T: Hash> Hash for Tuple<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.layout.hash(state);
        self.positional().hash(state);
        for (_, value) in self.named_canonical() {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tuple<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tuple")
            .field("tag", &self.tag())
            .field("positional", &self.positional())
            .field("named", &NamedDebug(self))
            .finish()
    }
}

struct NamedDebug<'a, T>(&'a Tuple<T>);

impl<T: fmt::Debug> fmt::Debug for NamedDebug<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.named()).finish()
    }
}

/// Display adapter for [`Tuple`].
pub struct TupleDisplay<'a, T, L> {
    tuple: &'a Tuple<T>,
    lookup: &'a L,
}

impl<T: fmt::Display, L: SymbolLookup> fmt::Display for TupleDisplay<'_, T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = self.tuple.tag() {
            f.write_str(self.lookup.lookup(tag))?;
        }
        f.write_str("(")?;
        for (i, entry) in self.tuple.entries().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match entry {
                TupleEntry::Pos(value) => write!(f, "{value}")?,
                TupleEntry::Named(symbol, value) => {
                    write!(f, "{}: {value}", self.lookup.lookup(symbol))?;
                }
            }
        }
        f.write_str(")")
    }
}
