//! Vamp IR - shared identity types
//!
//! This crate contains the leaf data structures every other compiler phase
//! builds on:
//! - `Symbol` for interned names
//! - `SymbolInterner` / `SharedInterner` for interning and lookup
//! - `Span` for source locations carried by diagnostics
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: names become `Symbol(u32)` with O(1) equality
//! - **Explicit State**: interners are owned by the pipeline context and
//!   passed down, never stored in globals

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod span;
mod symbol;

pub use interner::{InternError, SharedInterner, SymbolInterner, SymbolLookup};
pub use span::Span;
pub use symbol::Symbol;

static_assert_size!(Symbol, 4);
static_assert_size!(Span, 8);
