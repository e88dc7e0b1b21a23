//! Construction and access errors.
//!
//! These are hard failures: the parser and type checker surface them as
//! diagnostics against the literal or type expression that caused them.

use vamp_diagnostic::{Diagnostic, ErrorCode};
use vamp_ir::{Span, Symbol, SymbolLookup};

/// Error raised while building or reading a tuple or layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TupleError {
    /// A named field was declared or supplied twice.
    #[error("duplicate field {field:?}")]
    DuplicateField { field: Symbol },
    /// Positional value count differs from the layout's arity.
    #[error("expected {expected} positional values, found {found}")]
    ArityMismatch { expected: usize, found: usize },
    /// A named value or lookup refers to a field the layout lacks.
    #[error("unknown field {field:?}")]
    UnknownField { field: Symbol },
    /// A layout field received no value.
    #[error("missing value for field {field:?}")]
    MissingField { field: Symbol },
    /// Positional access outside `0..positional_count`.
    #[error("index {index} out of range for {len} positional values")]
    IndexOutOfRange { index: usize, len: usize },
}

impl TupleError {
    /// The error code this error reports under.
    pub fn code(&self) -> ErrorCode {
        match self {
            TupleError::DuplicateField { .. } => ErrorCode::E2101,
            TupleError::ArityMismatch { .. } => ErrorCode::E2102,
            TupleError::UnknownField { .. } => ErrorCode::E2103,
            TupleError::MissingField { .. } => ErrorCode::E2104,
            TupleError::IndexOutOfRange { .. } => ErrorCode::E2105,
        }
    }

    /// Convert to a diagnostic with field names resolved.
    pub fn to_diagnostic(&self, span: Span, lookup: &impl SymbolLookup) -> Diagnostic {
        let diag = Diagnostic::error(self.code());
        match self {
            TupleError::DuplicateField { field } => {
                let name = lookup.lookup(*field);
                diag.with_message(format!("field `{name}` is specified more than once"))
                    .with_label(span, format!("duplicate `{name}:`"))
                    .with_suggestion(format!("remove one of the `{name}:` entries"))
            }
            TupleError::ArityMismatch { expected, found } => {
                let plural = if *expected == 1 { "" } else { "s" };
                diag.with_message(format!(
                    "wrong number of positional values: expected {expected}, found {found}"
                ))
                .with_label(span, format!("expected {expected} positional value{plural}"))
            }
            TupleError::UnknownField { field } => {
                let name = lookup.lookup(*field);
                diag.with_message(format!("no field `{name}` in this tuple"))
                    .with_label(span, "unknown field")
            }
            TupleError::MissingField { field } => {
                let name = lookup.lookup(*field);
                diag.with_message(format!("missing value for field `{name}`"))
                    .with_label(span, format!("`{name}:` not provided"))
                    .with_suggestion(format!("add `{name}: <value>`"))
            }
            TupleError::IndexOutOfRange { index, len } => diag
                .with_message(format!("index {index} is out of range"))
                .with_label(span, "positional index")
                .with_note(format!(
                    "the tuple has {len} positional value{}; named fields are not reachable by index",
                    if *len == 1 { "" } else { "s" }
                )),
        }
    }
}
