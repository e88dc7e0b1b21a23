//! Error codes for tuple, pattern, and type diagnostics.
//!
//! Each code is a unique identifier (e.g., `E2101`) with the first digit
//! indicating the compiler phase.

use std::fmt;

/// Error codes for all tuple-related diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E2xxx: Construction and type errors
/// - E3xxx: Pattern errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Construction / Type Errors (E2xxx)
    /// Named field declared twice
    E2101,
    /// Positional arity mismatch
    E2102,
    /// Field not present in the layout
    E2103,
    /// Layout field without a value
    E2104,
    /// Positional index out of range
    E2105,
    /// Tuple type mismatch
    E2106,

    // Pattern Errors (E3xxx)
    /// More than one rest marker in a pattern
    E3101,
    /// Refutable pattern did not match
    E3102,

    // Internal Errors (E9xxx)
    /// Internal compiler error
    E9001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E2101,
        ErrorCode::E2102,
        ErrorCode::E2103,
        ErrorCode::E2104,
        ErrorCode::E2105,
        ErrorCode::E2106,
        ErrorCode::E3101,
        ErrorCode::E3102,
        ErrorCode::E9001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2101 => "E2101",
            ErrorCode::E2102 => "E2102",
            ErrorCode::E2103 => "E2103",
            ErrorCode::E2104 => "E2104",
            ErrorCode::E2105 => "E2105",
            ErrorCode::E2106 => "E2106",
            ErrorCode::E3101 => "E3101",
            ErrorCode::E3102 => "E3102",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description, used by `--explain` style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E2101 => "a named field appears more than once",
            ErrorCode::E2102 => "wrong number of positional members",
            ErrorCode::E2103 => "field is not part of the tuple's layout",
            ErrorCode::E2104 => "a field of the layout has no value",
            ErrorCode::E2105 => "positional index out of range",
            ErrorCode::E2106 => "tuple types are not compatible",
            ErrorCode::E3101 => "a pattern may contain at most one `...` rest marker",
            ErrorCode::E3102 => "refutable pattern did not match",
            ErrorCode::E9001 => "internal compiler error",
        }
    }

    /// Check if this is a construction or type error (E2xxx range).
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2101
                | ErrorCode::E2102
                | ErrorCode::E2103
                | ErrorCode::E2104
                | ErrorCode::E2105
                | ErrorCode::E2106
        )
    }

    /// Check if this is a pattern error (E3xxx range).
    pub fn is_pattern_error(&self) -> bool {
        matches!(self, ErrorCode::E3101 | ErrorCode::E3102)
    }

    /// Check if this is an internal compiler error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2101"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
