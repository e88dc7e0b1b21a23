//! Diagnostic system for tuple and type errors.
//!
//! Every hard failure raised while building or comparing tuples can be turned
//! into a [`Diagnostic`]:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Notes and suggestions (why, and how to fix)

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
