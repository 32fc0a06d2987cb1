//! Error codes for composition parsing issues.
//!
//! Codes are organized by stage:
//! - `E0xx` - Format recognition
//! - `E1xx` - Quantity resolution

use std::fmt;

use serde::Serialize;

/// Error codes for categorizing parsing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    // =========================================================================
    // Format Recognition (E0xx)
    // =========================================================================
    /// Unrecognized format.
    ///
    /// No parsing strategy matched the shape of the input.
    E001,

    /// Unknown phase symbol.
    ///
    /// A token in hard-phase position is not a registered ceramic formula.
    E002,

    /// Malformed binder composition.
    ///
    /// No registered binder metal could be found in the binder substring.
    E003,

    // =========================================================================
    // Quantity Resolution (E1xx)
    // =========================================================================
    /// Ambiguous quantity.
    ///
    /// Neither the ceramic nor the binder percentage is known, so no
    /// complement can be inferred.
    E100,

    /// Incomplete data.
    ///
    /// A placeholder quantity needs caller-supplied data (for example a
    /// measured binder volume fraction) before it can be resolved.
    E101,

    /// Inconsistent quantities.
    ///
    /// Inferred quantities violate an arithmetic invariant, such as a
    /// negative remainder.
    E102,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unrecognized composition format",
            ErrorCode::E002 => "unknown phase symbol",
            ErrorCode::E003 => "malformed binder composition",
            ErrorCode::E100 => "ambiguous quantity",
            ErrorCode::E101 => "incomplete data",
            ErrorCode::E102 => "inconsistent quantities",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E102.to_string(), "E102");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(
            ErrorCode::E001.description(),
            "unrecognized composition format"
        );
        assert_eq!(ErrorCode::E101.description(), "incomplete data");
    }
}
