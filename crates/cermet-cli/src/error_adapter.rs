//! Error adapter for converting Cermet results and errors to miette diagnostics.
//!
//! Rows that did not parse cleanly are reported through [`RowDiagnostic`],
//! which points at the composition text. Failures of the run itself
//! ([`CermetError`]) go through [`ErrorAdapter`].

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use cermet::{BatchReport, CermetError, IssueKind, ParsedComposition, Severity};

use crate::rows::InputRow;

/// Adapter for a row whose result carries an issue.
pub struct RowDiagnostic<'a> {
    row: &'a InputRow,
    result: &'a ParsedComposition,
    issue: IssueKind,
}

impl<'a> RowDiagnostic<'a> {
    /// Wraps `result` if it carries an issue.
    pub fn new(row: &'a InputRow, result: &'a ParsedComposition) -> Option<Self> {
        let issue = result.issue()?;
        Some(Self { row, result, issue })
    }

    /// The issue being reported.
    pub fn issue(&self) -> IssueKind {
        self.issue
    }

    /// Line number of the row in the input.
    pub fn line(&self) -> usize {
        self.row.line
    }
}

impl fmt::Debug for RowDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowDiagnostic")
            .field("line", &self.row.line)
            .field("issue", &self.issue)
            .finish()
    }
}

impl fmt::Display for RowDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.row.line, self.result.message())
    }
}

impl std::error::Error for RowDiagnostic<'_> {}

impl MietteDiagnostic for RowDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.issue.code()))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.issue.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.issue
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.row.composition as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = SourceSpan::new(0.into(), self.row.composition.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(self.issue.to_string()), span),
        )))
    }
}

/// Adapter for [`CermetError`], which has no source text to point at.
pub struct ErrorAdapter<'a>(pub &'a CermetError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CermetError::Io(_) => "cermet::io",
            CermetError::Config(_) => "cermet::config",
        };
        Some(Box::new(code))
    }
}

/// A reportable problem that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An issue found in one input row.
    Row(RowDiagnostic<'a>),
    /// An error that stopped the run.
    Error(ErrorAdapter<'a>),
}

impl Reportable<'_> {
    /// Returns `true` if this should be logged as a warning rather than an error.
    pub fn is_warning(&self) -> bool {
        match self {
            Reportable::Row(row) => row.issue().severity().is_warning(),
            Reportable::Error(_) => false,
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Row(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Row(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Row(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Row(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Row(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Row(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Row(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CermetError`] into a list of reportable errors.
pub fn to_reportables(err: &CermetError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}

/// One [`Reportable`] for every row whose result carries an issue, in row order.
pub fn row_reportables<'a>(rows: &'a [InputRow], report: &'a BatchReport) -> Vec<Reportable<'a>> {
    rows.iter()
        .zip(report.results())
        .filter_map(|(row, result)| RowDiagnostic::new(row, result))
        .map(Reportable::Row)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io;

    use cermet::{BatchRow, Cermet, ErrorCode};

    use super::*;

    fn parse(rows: &[InputRow]) -> BatchReport {
        Cermet::default().parse_batch(rows.iter().map(|row| BatchRow::new(&row.composition)))
    }

    #[test]
    fn test_clean_rows_are_not_reported() {
        let rows = [InputRow::new(1, "WC-10Co"), InputRow::new(2, "90 WC 10 Co")];
        let report = parse(&rows);

        assert!(row_reportables(&rows, &report).is_empty());
    }

    #[test]
    fn test_failed_row_is_an_error() {
        let rows = [InputRow::new(1, "WC-10Co"), InputRow::new(7, "###garbage###")];
        let report = parse(&rows);

        let reportables = row_reportables(&rows, &report);
        assert_eq!(reportables.len(), 1);

        let reportable = &reportables[0];
        assert!(!reportable.is_warning());
        assert!(reportable.to_string().starts_with("line 7: "));
        assert_eq!(
            reportable.code().unwrap().to_string(),
            ErrorCode::E001.to_string()
        );
        assert_eq!(reportable.severity(), Some(miette::Severity::Error));
        assert!(reportable.help().is_some());
    }

    #[test]
    fn test_incomplete_row_is_a_warning() {
        let rows = [InputRow::new(3, "WC x Co")];
        let report = parse(&rows);

        let reportables = row_reportables(&rows, &report);
        assert_eq!(reportables.len(), 1);
        assert!(reportables[0].is_warning());
        assert_eq!(reportables[0].severity(), Some(miette::Severity::Warning));
    }

    #[test]
    fn test_label_covers_composition() {
        let rows = [InputRow::new(1, "WC-Co")];
        let report = parse(&rows);

        let reportables = row_reportables(&rows, &report);
        let labels: Vec<_> = reportables[0].labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), 0);
        assert_eq!(labels[0].len(), "WC-Co".len());
    }

    #[test]
    fn test_cermet_error() {
        let err = CermetError::Io(io::Error::other("disk on fire"));

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "I/O error: disk on fire");
                assert_eq!(e.code().unwrap().to_string(), "cermet::io");
            }
            Reportable::Row(_) => panic!("Expected Error"),
        }
    }
}
