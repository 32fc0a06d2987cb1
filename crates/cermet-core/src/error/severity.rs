//! Severity levels for parsing issues.

use std::fmt;

use serde::Serialize;

/// The severity level of an issue.
///
/// - [`Severity::Error`] means the row produced no usable composition
/// - [`Severity::Warning`] means the row parsed but still needs data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The composition could not be parsed.
    Error,

    /// The composition parsed, but some quantity is still unresolved.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
