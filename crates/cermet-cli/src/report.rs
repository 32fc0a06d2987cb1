//! Rendering batch results as text or TOML.

use std::{collections::BTreeMap, fmt::Write};

use serde::Serialize;

use cermet::{BatchReport, ParsedComposition, formula::format_amount};

use crate::rows::InputRow;

/// Writes one line per row followed by a summary line.
pub fn render_text(rows: &[InputRow], report: &BatchReport) -> String {
    let mut out = String::new();
    for (row, result) in rows.iter().zip(report.results()) {
        let _ = writeln!(
            out,
            "{}: {} => {}",
            row.line,
            row.composition,
            describe(result)
        );
    }
    let _ = writeln!(
        out,
        "{} rows: {} succeeded, {} incomplete, {} failed",
        report.len(),
        report.succeeded(),
        report.incomplete(),
        report.failed()
    );
    out
}

/// One-line description of a result.
fn describe(result: &ParsedComposition) -> String {
    if !result.is_success() {
        return match result.issue() {
            Some(issue) => format!("{}: {}", issue.code(), result.message()),
            None => result.message().to_string(),
        };
    }

    let mut parts: Vec<String> = result
        .ceramic_elements()
        .iter()
        .map(|(formula, value)| match value {
            Some(value) => format!("{formula} {} wt%", format_amount(*value)),
            None => format!("{formula} ? wt%"),
        })
        .collect();

    let binder_pct = result
        .binder_wt_pct()
        .map_or_else(|| "?".to_string(), format_amount);
    let mut binder = format!("binder {binder_pct} wt% {}", result.binder_formula());
    if result.is_hea() {
        binder.push_str(" (HEA)");
    }
    parts.push(binder);

    let mut line = parts.join(", ");
    if let Some(strategy) = result.strategy() {
        let _ = write!(line, " [{strategy}]");
    }
    if result.requires_external_data() {
        line.push_str(" needs binder volume");
    }
    line
}

#[derive(Debug, Serialize)]
struct TomlSummary {
    rows: usize,
    succeeded: usize,
    incomplete: usize,
    failed: usize,
}

/// A row with only TOML-representable values; unknown quantities are
/// listed instead of written as missing values.
#[derive(Debug, Serialize)]
struct TomlRow<'a> {
    line: usize,
    input: &'a str,
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ceramic_formula: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secondary_phase: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    binder_vol_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    binder_wt_pct: Option<f64>,
    #[serde(skip_serializing_if = "str::is_empty")]
    binder_formula: &'a str,
    is_hea: bool,
    requires_external_data: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unresolved: Vec<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    ceramic_wt_pct: BTreeMap<&'a str, f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    binder_at_fraction: BTreeMap<&'a str, f64>,
}

impl<'a> TomlRow<'a> {
    fn new(row: &'a InputRow, result: &'a ParsedComposition) -> Self {
        let ceramic = result.ceramic_elements();
        Self {
            line: row.line,
            input: &row.composition,
            success: result.is_success(),
            message: result.message(),
            code: result.issue().map(|issue| issue.code().as_str()),
            strategy: result.strategy().map(|strategy| strategy.to_string()),
            ceramic_formula: result.ceramic_formula(),
            secondary_phase: result.secondary_phase(),
            binder_vol_pct: row.binder_vol_pct,
            binder_wt_pct: result.binder_wt_pct(),
            binder_formula: result.binder_formula(),
            is_hea: result.is_hea(),
            requires_external_data: result.requires_external_data(),
            unresolved: ceramic
                .iter()
                .filter(|(_, value)| value.is_none())
                .map(|(formula, _)| formula.as_str())
                .collect(),
            ceramic_wt_pct: ceramic
                .iter()
                .filter_map(|(formula, value)| value.map(|value| (formula.as_str(), value)))
                .collect(),
            binder_at_fraction: result
                .binder_elements()
                .iter()
                .map(|(symbol, fraction)| (symbol.as_str(), *fraction))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TomlReport<'a> {
    summary: TomlSummary,
    rows: Vec<TomlRow<'a>>,
}

/// Serializes the rows and their results as a TOML document.
///
/// # Errors
///
/// Returns the serializer error if a value cannot be written as TOML.
pub fn render_toml(rows: &[InputRow], report: &BatchReport) -> Result<String, toml::ser::Error> {
    let document = TomlReport {
        summary: TomlSummary {
            rows: report.len(),
            succeeded: report.succeeded(),
            incomplete: report.incomplete(),
            failed: report.failed(),
        },
        rows: rows
            .iter()
            .zip(report.results())
            .map(|(row, result)| TomlRow::new(row, result))
            .collect(),
    };
    toml::to_string(&document)
}
