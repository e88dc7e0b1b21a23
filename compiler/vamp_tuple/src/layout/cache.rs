//! Layout cache: one shared `Layout` per distinct tuple shape.
//!
//! Follows the same double-checked `RwLock` scheme as `SymbolInterner`. The
//! cache lives as long as the compilation that owns it and never evicts; the
//! number of distinct shapes is bounded by source size.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use vamp_ir::Symbol;

use super::{Layout, LayoutKey};
use crate::TupleError;

/// Canonicalizing store of tuple layouts.
///
/// # Thread Safety
/// Lookups take the read lock; a miss re-checks under the write lock, so two
/// threads constructing the same shape always receive the same `Arc<Layout>`.
pub struct LayoutCache {
    layouts: RwLock<FxHashMap<LayoutKey, Arc<Layout>>>,
    canonicalize: bool,
}

impl LayoutCache {
    /// Create an empty canonicalizing cache.
    pub fn new() -> Self {
        LayoutCache {
            layouts: RwLock::new(FxHashMap::default()),
            canonicalize: true,
        }
    }

    /// Create a cache that never shares layouts.
    ///
    /// Every `construct` call builds a fresh layout. Layout equality then falls
    /// back to full structural comparison instead of the pointer fast path.
    pub fn uncached() -> Self {
        LayoutCache {
            layouts: RwLock::new(FxHashMap::default()),
            canonicalize: false,
        }
    }

    /// Whether identical shapes share one `Layout`.
    pub fn is_canonicalizing(&self) -> bool {
        self.canonicalize
    }

    /// Construct (or fetch) the layout for a shape.
    ///
    /// Fails with `DuplicateField` if a named symbol repeats. When the shape is
    /// already cached under a different declaration order, the first-seen
    /// layout is returned.
    pub fn construct(
        &self,
        positional_count: usize,
        named: &[Symbol],
        tag: Option<Symbol>,
    ) -> Result<Arc<Layout>, TupleError> {
        if !self.canonicalize {
            return Ok(Arc::new(Layout::new(positional_count, named, tag)?));
        }
        let key = LayoutKey::new(positional_count, named, tag)?;

        // Fast path: shape already registered
        if let Some(layout) = self.layouts.read().get(&key) {
            tracing::trace!(positional_count, named = named.len(), "layout cache hit");
            return Ok(Arc::clone(layout));
        }

        let mut guard = self.layouts.write();

        // Double-check after acquiring write lock
        if let Some(layout) = guard.get(&key) {
            tracing::trace!(positional_count, named = named.len(), "layout cache hit");
            return Ok(Arc::clone(layout));
        }

        let layout = Arc::new(Layout::new(positional_count, named, tag)?);
        tracing::debug!(
            positional_count,
            named = named.len(),
            tagged = tag.is_some(),
            "registered new layout"
        );
        guard.insert(key, Arc::clone(&layout));
        Ok(layout)
    }

    /// The positional-only, untagged layout of arity `positional_count`.
    pub fn positional(&self, positional_count: usize) -> Arc<Layout> {
        // No named fields, so no duplicate can exist.
        self.construct(positional_count, &[], None)
            .unwrap_or_else(|_| Arc::new(Layout::positional(positional_count)))
    }

    /// Number of distinct layouts registered.
    pub fn len(&self) -> usize {
        self.layouts.read().len()
    }

    /// Check if no layout has been registered.
    pub fn is_empty(&self) -> bool {
        self.layouts.read().is_empty()
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LayoutCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutCache")
            .field("len", &self.len())
            .field("canonicalize", &self.canonicalize)
            .finish()
    }
}

/// Shared layout cache for use across compiler phases and threads.
#[derive(Clone, Default, Debug)]
pub struct SharedLayoutCache(Arc<LayoutCache>);

impl SharedLayoutCache {
    /// Create a new shared canonicalizing cache.
    pub fn new() -> Self {
        SharedLayoutCache(Arc::new(LayoutCache::new()))
    }

    /// Wrap an existing cache.
    pub fn from_cache(cache: LayoutCache) -> Self {
        SharedLayoutCache(Arc::new(cache))
    }
}

impl std::ops::Deref for SharedLayoutCache {
    type Target = LayoutCache;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
