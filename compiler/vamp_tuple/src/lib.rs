//! Unified positional/named tuple container.
//!
//! One structure represents both runtime composite values (`Tuple<Value>`)
//! and compile-time product types (`Tuple<Ty>`):
//! - [`Layout`]: positional arity, named-field set, optional tag
//! - [`LayoutIndex`]: sorted symbol index giving O(log n) field lookup
//! - [`LayoutCache`]: canonicalizes layouts so identical shapes are shared
//! - [`Tuple`]: a layout plus an aligned value array, O(1) positional access
//!
//! # Ordering
//!
//! Positional members always precede named members. Named-field declaration
//! order is kept for display and iteration, and never affects equality.

mod builder;
#[cfg(feature = "cache")]
pub mod encoding;
mod error;
mod layout;
mod tuple;

pub use builder::TupleBuilder;
pub use error::TupleError;
pub use layout::{Layout, LayoutCache, LayoutDisplay, LayoutIndex, LayoutKey, SharedLayoutCache};
pub use tuple::{Tuple, TupleDisplay, TupleEntry, TupleKey};
