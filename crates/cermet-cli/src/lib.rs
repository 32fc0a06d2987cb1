//! CLI logic for the Cermet composition parser.
//!
//! Reads composition rows from a file, stdin or the command line, parses
//! them as one batch and writes a text or TOML report.

pub mod error_adapter;

mod args;
mod config;
mod report;
mod rows;

pub use args::{Args, OutputFormat};
pub use rows::InputRow;

use std::{fs, io};

use log::info;

use cermet::{BatchReport, BatchRow, Cermet, CermetError};

use error_adapter::{Reportable, row_reportables};

/// The rows a run parsed and what came of them.
#[derive(Debug)]
pub struct RunOutcome {
    rows: Vec<InputRow>,
    report: BatchReport,
}

impl RunOutcome {
    pub fn rows(&self) -> &[InputRow] {
        &self.rows
    }

    pub fn report(&self) -> &BatchReport {
        &self.report
    }

    /// Diagnostics for the rows that failed or still need data.
    pub fn diagnostics(&self) -> Vec<Reportable<'_>> {
        row_reportables(&self.rows, &self.report)
    }
}

/// Run the Cermet CLI application
///
/// Rows from the input file come first, followed by `--composition` values
/// numbered by their position on the command line. Rows that fail to parse
/// are part of the report, not an error.
///
/// # Errors
///
/// Returns `CermetError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid configuration values
pub fn run(args: &Args) -> Result<RunOutcome, CermetError> {
    info!(
        input_path = args.input.as_deref().unwrap_or(""),
        inline = args.compositions.len();
        "Processing compositions"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let cermet = Cermet::new(app_config)?;

    let mut rows = match args.input.as_deref() {
        Some("-") => rows::read_rows(&io::read_to_string(io::stdin())?),
        Some(path) => rows::read_rows(&fs::read_to_string(path)?),
        None => Vec::new(),
    };
    rows.extend(
        args.compositions
            .iter()
            .enumerate()
            .map(|(index, composition)| InputRow::new(index + 1, composition.as_str())),
    );

    let report = cermet.parse_batch(
        rows.iter()
            .map(|row| BatchRow::new(&row.composition).with_binder_vol_pct(row.binder_vol_pct)),
    );

    let rendered = match args.format {
        OutputFormat::Text => report::render_text(&rows, &report),
        OutputFormat::Toml => report::render_toml(&rows, &report).map_err(io::Error::other)?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!(output_file = path; "Report written");
        }
        None => print!("{rendered}"),
    }

    Ok(RunOutcome { rows, report })
}
