//! Type mismatch reporting.

use std::fmt::Write;

use vamp_diagnostic::{Diagnostic, ErrorCode};
use vamp_ir::{Span, Symbol, SymbolLookup};
use vamp_tuple::TupleKey;

use crate::Ty;

/// What went wrong at the failing position.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MismatchKind {
    #[error("expected {}, found {}", .expected.kind_name(), .found.kind_name())]
    Incompatible { expected: Ty, found: Ty },
    #[error("expected {expected} positional members, found {found}")]
    PositionalArity { expected: usize, found: usize },
    #[error("tags differ")]
    TagMismatch {
        expected: Option<Symbol>,
        found: Option<Symbol>,
    },
    #[error("missing field {field:?}")]
    MissingField { field: Symbol },
    #[error("unexpected field {field:?}")]
    ExtraField { field: Symbol },
}

/// Failure of a subtype or equivalence check, located by the path of tuple
/// members from the outermost type down.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("tuple type mismatch: {kind}")]
pub struct TypeMismatch {
    pub path: Vec<TupleKey>,
    pub kind: MismatchKind,
}

impl TypeMismatch {
    pub fn new(kind: MismatchKind) -> Self {
        TypeMismatch {
            path: Vec::new(),
            kind,
        }
    }

    /// Prefix the path with the member the failure was found under.
    #[must_use]
    pub fn within(mut self, key: TupleKey) -> Self {
        self.path.insert(0, key);
        self
    }

    /// Render the path as `.0.name.1`, empty at the top level.
    pub fn path_display(&self, lookup: &impl SymbolLookup) -> String {
        let mut out = String::new();
        for key in &self.path {
            // Writing to a String cannot fail.
            let _ = match key {
                TupleKey::Index(index) => write!(out, ".{index}"),
                TupleKey::Field(field) => write!(out, ".{}", lookup.lookup(*field)),
            };
        }
        out
    }

    pub fn to_diagnostic(&self, span: Span, lookup: &impl SymbolLookup) -> Diagnostic {
        let tag_name = |tag: Option<Symbol>| match tag {
            Some(tag) => format!("`{}`", lookup.lookup(tag)),
            None => "no tag".to_owned(),
        };
        let label = match &self.kind {
            MismatchKind::Incompatible { expected, found } => format!(
                "expected `{}`, found `{}`",
                expected.display(lookup),
                found.display(lookup)
            ),
            MismatchKind::PositionalArity { expected, found } => {
                format!("expected {expected} positional members, found {found}")
            }
            MismatchKind::TagMismatch { expected, found } => {
                format!("expected {}, found {}", tag_name(*expected), tag_name(*found))
            }
            MismatchKind::MissingField { field } => {
                format!("missing field `{}`", lookup.lookup(*field))
            }
            MismatchKind::ExtraField { field } => {
                format!("unexpected field `{}`", lookup.lookup(*field))
            }
        };
        let diag = Diagnostic::error(ErrorCode::E2106)
            .with_message("mismatched tuple types")
            .with_label(span, label);
        if self.path.is_empty() {
            diag
        } else {
            diag.with_note(format!("at member `{}`", self.path_display(lookup)))
        }
    }
}
