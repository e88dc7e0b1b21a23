//! Malformed-pattern errors.

use vamp_diagnostic::{Diagnostic, ErrorCode};
use vamp_ir::{Span, SymbolLookup};
use vamp_tuple::TupleError;

/// Error for a pattern that can never be matched as written.
///
/// Distinct from [`MatchFailure`](crate::MatchFailure), which is the ordinary
/// "this value does not fit" outcome.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// Two `...` markers among the positional sub-patterns.
    #[error("positional rest marker at {second} follows another at {first}")]
    MultipleRest { first: usize, second: usize },
    /// Building a rest capture failed.
    #[error("failed to build rest capture: {0}")]
    Capture(#[from] TupleError),
}

impl PatternError {
    /// The error code this error reports under.
    pub fn code(&self) -> ErrorCode {
        match self {
            PatternError::MultipleRest { .. } => ErrorCode::E3101,
            PatternError::Capture(_) => ErrorCode::E9001,
        }
    }

    /// Convert to a diagnostic.
    pub fn to_diagnostic(&self, span: Span, lookup: &impl SymbolLookup) -> Diagnostic {
        match self {
            PatternError::MultipleRest { first, second } => Diagnostic::error(self.code())
                .with_message("only one `...` rest marker is allowed in a tuple pattern")
                .with_label(span, format!("second rest marker at position {second}"))
                .with_note(format!("the first rest marker is at position {first}")),
            PatternError::Capture(inner) => Diagnostic::error(self.code())
                .with_message("internal error while binding a rest pattern")
                .with_label(span, "in this pattern")
                .with_note(inner.to_diagnostic(span, lookup).message),
        }
    }
}
