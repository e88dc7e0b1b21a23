//! Canonical serialization for caching compiled artifacts.
//!
//! Symbol ids are process-local, so the encoding carries names instead:
//! optional tag name, positional count, positional values in order, then named
//! values sorted by symbol *name*. Two tuples that compare equal encode to the
//! same bytes regardless of how their layouts were declared.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use vamp_ir::{InternError, Symbol, SymbolInterner, SymbolLookup};

use crate::{LayoutCache, Tuple, TupleError};

/// Process-independent form of a tuple.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTuple<T> {
    pub tag: Option<String>,
    pub positional_count: u32,
    pub positional: Vec<T>,
    pub named: Vec<(String, T)>,
}

/// Error while encoding or decoding a canonical tuple.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("canonical tuple codec failed: {0}")]
    Codec(#[from] bincode::Error),
    #[error("positional count {declared} does not match {found} encoded values")]
    PositionalCount { declared: u32, found: usize },
    #[error("positional count {0} does not fit in the encoding")]
    TooManyPositional(usize),
    #[error(transparent)]
    Tuple(#[from] TupleError),
    #[error(transparent)]
    Intern(#[from] InternError),
}

impl<T: Clone> Tuple<T> {
    /// Convert to the canonical form.
    pub fn to_canonical(
        &self,
        lookup: &impl SymbolLookup,
    ) -> Result<CanonicalTuple<T>, EncodingError> {
        let positional_count = u32::try_from(self.positional_count())
            .map_err(|_| EncodingError::TooManyPositional(self.positional_count()))?;
        let mut named: Vec<(String, T)> = self
            .named()
            .map(|(symbol, value)| (lookup.lookup(symbol).to_owned(), value.clone()))
            .collect();
        named.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(CanonicalTuple {
            tag: self.tag().map(|tag| lookup.lookup(tag).to_owned()),
            positional_count,
            positional: self.positional().to_vec(),
            named,
        })
    }
}

impl<T> Tuple<T> {
    /// Rebuild a tuple from its canonical form, interning names and
    /// resolving the layout through `cache`.
    pub fn from_canonical(
        canonical: CanonicalTuple<T>,
        interner: &SymbolInterner,
        cache: &LayoutCache,
    ) -> Result<Self, EncodingError> {
        if canonical.positional.len() != canonical.positional_count as usize {
            return Err(EncodingError::PositionalCount {
                declared: canonical.positional_count,
                found: canonical.positional.len(),
            });
        }
        let tag = canonical
            .tag
            .as_deref()
            .map(|tag| interner.try_intern(tag))
            .transpose()?;
        let named = canonical
            .named
            .into_iter()
            .map(|(name, value)| Ok((interner.try_intern_owned(name)?, value)))
            .collect::<Result<Vec<(Symbol, T)>, InternError>>()?;
        let symbols: SmallVec<[Symbol; 8]> = named.iter().map(|&(symbol, _)| symbol).collect();
        let layout = cache.construct(canonical.positional.len(), &symbols, tag)?;
        Ok(Tuple::construct(layout, canonical.positional, named)?)
    }
}

/// Encode a canonical tuple to bytes.
pub fn encode<T: Serialize>(canonical: &CanonicalTuple<T>) -> Result<Vec<u8>, EncodingError> {
    Ok(bincode::serialize(canonical)?)
}

/// Decode a canonical tuple from bytes.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<CanonicalTuple<T>, EncodingError> {
    Ok(bincode::deserialize(bytes)?)
}
