//! Core types and reference data for cermet compositions.
//!
//! This crate holds everything the composition parser needs that is not
//! parsing itself: the immutable [`Registry`] of ceramic phases, binder
//! metals, molar masses and densities, the [`ElementClassifier`], the
//! canonical [`ParsedComposition`] value, formula normalization, and the
//! weight/atomic/volume conversions.

pub mod classify;
pub mod composition;
pub mod convert;
pub mod error;
pub mod formula;
pub mod registry;

pub use classify::{Classification, ElementClassifier, Phase};
pub use composition::{ParsedComposition, StrategyKind};
pub use error::{ErrorCode, IssueKind, Severity};
pub use registry::{Registry, RegistryBuilder, RegistryError};
