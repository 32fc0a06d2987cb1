//! The kinds of problems a composition string can have.

use std::fmt;

use serde::Serialize;

use crate::error::{ErrorCode, Severity};

/// A parsing problem, carried as data rather than raised.
///
/// `UnknownPhaseSymbol` and `MalformedBinderComposition` only cause a single
/// strategy to decline; they reach the final result when they explain why
/// the input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// No strategy recognized the input.
    UnrecognizedFormat,
    /// Neither side's percentage could be determined.
    AmbiguousQuantity,
    /// A hard-phase candidate is not in the ceramic registry.
    UnknownPhaseSymbol,
    /// A placeholder quantity needs external data.
    IncompleteData,
    /// No binder metal could be extracted.
    MalformedBinderComposition,
    /// Inferred quantities broke an arithmetic invariant.
    InconsistentQuantities,
}

impl IssueKind {
    /// Returns the [`ErrorCode`] for this issue.
    pub fn code(&self) -> ErrorCode {
        match self {
            IssueKind::UnrecognizedFormat => ErrorCode::E001,
            IssueKind::UnknownPhaseSymbol => ErrorCode::E002,
            IssueKind::MalformedBinderComposition => ErrorCode::E003,
            IssueKind::AmbiguousQuantity => ErrorCode::E100,
            IssueKind::IncompleteData => ErrorCode::E101,
            IssueKind::InconsistentQuantities => ErrorCode::E102,
        }
    }

    /// Returns the [`Severity`] for this issue.
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::IncompleteData => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Returns a suggestion for fixing the input, if there is one.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            IssueKind::UnrecognizedFormat => Some(
                "use a notation such as `WC-10Co`, `90 WC 10 Co`, or `b WC 25 Co`",
            ),
            IssueKind::AmbiguousQuantity => {
                Some("give the weight percent of either the ceramic or the binder")
            }
            IssueKind::UnknownPhaseSymbol => {
                Some("register the hard phase in the configuration registry")
            }
            IssueKind::IncompleteData => {
                Some("supply the measured binder volume percent for this row")
            }
            IssueKind::MalformedBinderComposition => {
                Some("write binder elements as symbols, e.g. `CoCrFeNi` or `Co20Ni10`")
            }
            IssueKind::InconsistentQuantities => {
                Some("check that the stated percentages do not exceed 100")
            }
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code().description())
    }
}
