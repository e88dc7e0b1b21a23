//! Compiler context for dependency injection.
//!
//! `CompilerContext` owns the resources every phase shares: the symbol
//! interner, the layout cache, and the configured type relation. The parser,
//! type checker, destructuring front-end, and runtime receive the context
//! instead of reaching for globals.

use std::sync::Arc;

use tracing::debug;
use vamp_ir::{SharedInterner, Symbol};
use vamp_patterns::Matcher;
use vamp_tuple::{LayoutCache, SharedLayoutCache, TupleBuilder};
use vamp_types::TypeRelation;

use crate::CompilerConfig;

/// Shared compiler context.
///
/// Cloning is cheap; clones share the interner and layout cache.
#[derive(Clone, Debug)]
pub struct CompilerContext {
    pub config: Arc<CompilerConfig>,
    pub interner: SharedInterner,
    pub layouts: SharedLayoutCache,
    pub types: TypeRelation,
}

impl CompilerContext {
    /// Create a context with fresh shared resources for `config`.
    pub fn new(config: CompilerConfig) -> Self {
        let cache = if config.cache.canonicalize_layouts {
            LayoutCache::new()
        } else {
            LayoutCache::uncached()
        };
        let types = TypeRelation::new(config.types.tuple_policy());
        debug!(
            canonicalize = config.cache.canonicalize_layouts,
            policy = ?types.policy(),
            "compiler context created"
        );
        CompilerContext {
            config: Arc::new(config),
            interner: SharedInterner::new(),
            layouts: SharedLayoutCache::from_cache(cache),
            types,
        }
    }

    /// Use an existing interner, e.g. one shared with a previous session.
    #[must_use]
    pub fn with_interner(mut self, interner: SharedInterner) -> Self {
        self.interner = interner;
        self
    }

    /// Use a type relation other than the configured one.
    #[must_use]
    pub fn with_type_relation(mut self, types: TypeRelation) -> Self {
        self.types = types;
        self
    }

    /// Intern a name.
    pub fn intern(&self, name: &str) -> Symbol {
        self.interner.intern(name)
    }

    /// A matcher building rest captures through this context's layout cache.
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.layouts)
    }

    /// Start a tuple literal, tagged when `tag` names a constructor.
    pub fn tuple_builder<T>(&self, tag: Option<&str>) -> TupleBuilder<T> {
        match tag {
            Some(tag) => TupleBuilder::tagged(self.intern(tag)),
            None => TupleBuilder::new(),
        }
    }
}

impl Default for CompilerContext {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

/// Thread-safe shared context reference.
pub type SharedContext = Arc<CompilerContext>;

/// Create a shared context from an owned context.
pub fn shared_context(ctx: CompilerContext) -> SharedContext {
    Arc::new(ctx)
}
