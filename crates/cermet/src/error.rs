//! Error types for Cermet operations.
//!
//! Parsing itself never fails: problems with a composition string are
//! reported as [`IssueKind`](cermet_core::IssueKind) data on the result.
//! [`CermetError`] covers what can go wrong around it.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// The main error type for Cermet operations.
#[derive(Debug, Error)]
pub enum CermetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
