//! Issue taxonomy for composition parsing.
//!
//! Parsing never raises: every problem is carried as data on the returned
//! [`ParsedComposition`](crate::ParsedComposition). This module provides:
//! - [`IssueKind`] - what went wrong
//! - [`ErrorCode`] - stable codes for documentation and searchability
//! - [`Severity`] - whether the row is unusable or merely incomplete

mod error_code;
mod issue;
mod severity;

pub use error_code::ErrorCode;
pub use issue::IssueKind;
pub use severity::Severity;
