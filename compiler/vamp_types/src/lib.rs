//! Vamp types and structural relations between them.
//!
//! Product types are [`Tuple<Ty>`](vamp_tuple::Tuple): the same container the
//! evaluator uses for values, with types in the slots. [`TypeRelation`]
//! decides equivalence and subtyping under a configurable [`TuplePolicy`].

mod mismatch;
mod policy;
mod relation;
mod ty;

pub use mismatch::{MismatchKind, TypeMismatch};
pub use policy::{TagPolicy, TuplePolicy, WidthPolicy};
pub use relation::TypeRelation;
pub use ty::{Ty, TyDisplay};
