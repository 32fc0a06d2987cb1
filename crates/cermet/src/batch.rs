//! Outcome of parsing many compositions at once.

use serde::Serialize;

use cermet_core::ParsedComposition;

/// One input row of a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchRow<'a> {
    pub composition: &'a str,
    /// Measured binder volume percent, if the dataset has one.
    pub binder_vol_pct: Option<f64>,
}

impl<'a> BatchRow<'a> {
    pub fn new(composition: &'a str) -> Self {
        Self {
            composition,
            binder_vol_pct: None,
        }
    }

    pub fn with_binder_vol_pct(mut self, binder_vol_pct: Option<f64>) -> Self {
        self.binder_vol_pct = binder_vol_pct;
        self
    }
}

impl<'a> From<&'a str> for BatchRow<'a> {
    fn from(composition: &'a str) -> Self {
        Self::new(composition)
    }
}

/// Per-row results of a batch, in input order, with outcome counts.
///
/// A row is *incomplete* when it parsed but still needs external data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    succeeded: usize,
    incomplete: usize,
    failed: usize,
    results: Vec<ParsedComposition>,
}

impl BatchReport {
    pub(crate) fn push(&mut self, result: ParsedComposition) {
        if !result.is_success() {
            self.failed += 1;
        } else if result.requires_external_data() {
            self.incomplete += 1;
        } else {
            self.succeeded += 1;
        }
        self.results.push(result);
    }

    /// Rows that parsed and need nothing else.
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn incomplete(&self) -> usize {
        self.incomplete
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[ParsedComposition] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ParsedComposition> {
        self.results
    }
}
