//! Structural equivalence and subtyping.
//!
//! Scalar types relate only to themselves. `Unknown` relates to everything in
//! both directions, `Void` is a subtype of everything, and a union is a
//! subtype of `u` when every member is, and a supertype of `t` when some
//! member is. Tuple types relate slot by slot under the configured
//! [`TuplePolicy`].

use tracing::debug;
use vamp_ir::Symbol;
use vamp_tuple::{Tuple, TupleKey};

use crate::{MismatchKind, Ty, TuplePolicy, TypeMismatch, WidthPolicy};

/// Type comparison under a fixed tuple policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeRelation {
    policy: TuplePolicy,
}

impl TypeRelation {
    pub fn new(policy: TuplePolicy) -> Self {
        TypeRelation { policy }
    }

    pub fn policy(&self) -> TuplePolicy {
        self.policy
    }

    /// Mutual compatibility: equal arity, equal tags, equal named-field sets,
    /// and every slot equivalent.
    pub fn is_equivalent(&self, a: &Ty, b: &Ty) -> bool {
        self.equivalent(a, b).is_ok()
    }

    /// Covariant compatibility of `sub` where `sup` is expected.
    pub fn is_subtype(&self, sub: &Ty, sup: &Ty) -> bool {
        self.subtype(sub, sup).is_ok()
    }

    /// [`is_subtype`](Self::is_subtype), naming the first failing member.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn check_subtype(&self, sub: &Ty, sup: &Ty) -> Result<(), TypeMismatch> {
        self.subtype(sub, sup).inspect_err(|mismatch| {
            debug!(kind = %mismatch.kind, depth = mismatch.path.len(), "subtype check failed");
        })
    }

    /// [`is_equivalent`](Self::is_equivalent), naming the first failing member.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn check_equivalent(&self, a: &Ty, b: &Ty) -> Result<(), TypeMismatch> {
        self.equivalent(a, b).inspect_err(|mismatch| {
            debug!(kind = %mismatch.kind, depth = mismatch.path.len(), "equivalence check failed");
        })
    }

    fn subtype(&self, sub: &Ty, sup: &Ty) -> Result<(), TypeMismatch> {
        match (sub, sup) {
            (Ty::Unknown, _) | (_, Ty::Unknown) | (Ty::Void, _) => Ok(()),
            (Ty::Any(members), _) => members.iter().try_for_each(|member| self.subtype(member, sup)),
            (_, Ty::Any(members)) => {
                if members.iter().any(|member| self.is_subtype(sub, member)) {
                    Ok(())
                } else {
                    Err(incompatible(sup, sub))
                }
            }
            (Ty::Tuple(sub), Ty::Tuple(sup)) => self.tuple_subtype(sub, sup),
            (Ty::Nil, Ty::Nil)
            | (Ty::Bool, Ty::Bool)
            | (Ty::Sym, Ty::Sym)
            | (Ty::Str, Ty::Str)
            | (Ty::Int, Ty::Int)
            | (Ty::Float, Ty::Float) => Ok(()),
            _ => Err(incompatible(sup, sub)),
        }
    }

    fn tuple_subtype(&self, sub: &Tuple<Ty>, sup: &Tuple<Ty>) -> Result<(), TypeMismatch> {
        check_arity(sub, sup)?;
        if !self.policy.tags.accepts(sub.tag(), sup.tag()) {
            return Err(TypeMismatch::new(MismatchKind::TagMismatch {
                expected: sup.tag(),
                found: sub.tag(),
            }));
        }
        for (i, (found, expected)) in sub.positional().iter().zip(sup.positional()).enumerate() {
            self.subtype(found, expected)
                .map_err(|mismatch| mismatch.within(TupleKey::Index(i)))?;
        }
        for (field, expected) in sup.named_canonical() {
            let found = sub
                .field(field)
                .ok_or_else(|| TypeMismatch::new(MismatchKind::MissingField { field }))?;
            self.subtype(found, expected)
                .map_err(|mismatch| mismatch.within(TupleKey::Field(field)))?;
        }
        match self.policy.width {
            WidthPolicy::Extensible => Ok(()),
            WidthPolicy::Exact => match extra_field(sub, sup) {
                Some(field) => Err(TypeMismatch::new(MismatchKind::ExtraField { field })),
                None => Ok(()),
            },
        }
    }

    fn equivalent(&self, a: &Ty, b: &Ty) -> Result<(), TypeMismatch> {
        match (a, b) {
            (Ty::Unknown, _) | (_, Ty::Unknown) => Ok(()),
            (Ty::Tuple(a), Ty::Tuple(b)) => self.tuple_equivalent(a, b),
            _ => {
                self.subtype(a, b)?;
                self.subtype(b, a)
            }
        }
    }

    // `b` plays the expected side in reported mismatches.
    fn tuple_equivalent(&self, a: &Tuple<Ty>, b: &Tuple<Ty>) -> Result<(), TypeMismatch> {
        check_arity(a, b)?;
        if a.tag() != b.tag() {
            return Err(TypeMismatch::new(MismatchKind::TagMismatch {
                expected: b.tag(),
                found: a.tag(),
            }));
        }
        if let Some(field) = extra_field(b, a) {
            return Err(TypeMismatch::new(MismatchKind::MissingField { field }));
        }
        if let Some(field) = extra_field(a, b) {
            return Err(TypeMismatch::new(MismatchKind::ExtraField { field }));
        }
        for (i, (x, y)) in a.positional().iter().zip(b.positional()).enumerate() {
            self.equivalent(x, y)
                .map_err(|mismatch| mismatch.within(TupleKey::Index(i)))?;
        }
        for (field, y) in b.named_canonical() {
            if let Some(x) = a.field(field) {
                self.equivalent(x, y)
                    .map_err(|mismatch| mismatch.within(TupleKey::Field(field)))?;
            }
        }
        Ok(())
    }
}

fn incompatible(expected: &Ty, found: &Ty) -> TypeMismatch {
    TypeMismatch::new(MismatchKind::Incompatible {
        expected: expected.clone(),
        found: found.clone(),
    })
}

fn check_arity(found: &Tuple<Ty>, expected: &Tuple<Ty>) -> Result<(), TypeMismatch> {
    if found.positional_count() == expected.positional_count() {
        Ok(())
    } else {
        Err(TypeMismatch::new(MismatchKind::PositionalArity {
            expected: expected.positional_count(),
            found: found.positional_count(),
        }))
    }
}

/// First named field of `a`, in ascending id order, that `b` lacks.
fn extra_field(a: &Tuple<Ty>, b: &Tuple<Ty>) -> Option<Symbol> {
    a.layout()
        .index()
        .symbols()
        .find(|&field| !b.layout().has_field(field))
}
