//! Destructuring patterns for Vamp tuples.
//!
//! A [`TuplePattern`] describes `Tag(a, _, ...rest, x:, y: (p, q), ...others)`:
//! ordered positional sub-patterns with at most one rest marker, named
//! sub-patterns matched by symbol, an optional capture of unmentioned named
//! fields, and an optional exact tag requirement.
//!
//! Matching never raises for a value that simply does not fit: the result is
//! [`MatchOutcome::Failed`] so multi-arm matches fall through to the next arm.
//! Only malformed patterns produce a [`PatternError`].

mod error;
mod matcher;
mod pattern;

pub use error::PatternError;
pub use matcher::{
    ArmMatch, Bindings, Destructure, MatchFailure, MatchOutcome, Matcher, SlotBinding,
};
pub use pattern::{FieldPattern, Pattern, PositionalPattern, TagRequirement, TuplePattern};
