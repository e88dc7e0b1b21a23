//! Vamp compiler pipeline support.
//!
//! Phases share one [`CompilerContext`]: it owns the symbol interner, the
//! layout cache, and the type relation configured from [`CompilerConfig`].
//! The context is created once at pipeline startup and dropped with it;
//! there is no global state.

mod config;
mod context;

use std::sync::Once;

pub use config::{CacheConfig, CompilerConfig, ConfigError, PackageConfig, TypesConfig};
pub use context::{shared_context, CompilerContext, SharedContext};

pub use vamp_diagnostic::{Diagnostic, ErrorCode};
pub use vamp_ir::{SharedInterner, Span, Symbol, SymbolLookup};
pub use vamp_patterns::{Matcher, MatchOutcome, TuplePattern};
pub use vamp_tuple::{Layout, SharedLayoutCache, Tuple, TupleBuilder, TupleError};
pub use vamp_types::{Ty, TypeRelation};

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber from `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
