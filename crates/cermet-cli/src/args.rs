//! Command-line argument definitions for the Cermet CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the compositions to parse, the report
//! format and destination, the configuration file, and logging verbosity.

use clap::{Parser, ValueEnum};

/// Report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per composition
    #[default]
    Text,
    /// A TOML document with every parsed field
    Toml,
}

/// Command-line arguments for the Cermet composition parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File with one composition per line, `-` for stdin
    ///
    /// A line may hold a binder volume percent after a tab. Blank lines and
    /// lines starting with `#` are skipped.
    #[arg(required_unless_present = "compositions")]
    pub input: Option<String>,

    /// Composition given directly on the command line; may be repeated
    #[arg(long = "composition", value_name = "TEXT")]
    pub compositions: Vec<String>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to the report file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
