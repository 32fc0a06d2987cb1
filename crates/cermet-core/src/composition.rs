//! The canonical result of parsing one composition string.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::error::IssueKind;

/// Identifies the notation a composition string was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// `WC-10CoCrFeNi`
    Dash,
    /// `WC 85 Co 10 Ni 5`
    Space,
    /// `b WC 25 Co`
    BPrefix,
    /// `WC x CoCrFeNi`
    XPlaceholder,
    /// `90 WC 10 Co`
    NumberFirst,
    /// `TiC 5 WC CoNi 20`
    MixedPhase,
    /// `CoCrFeNi`
    PureAlloy,
    /// A caller-supplied strategy.
    Custom(&'static str),
}

impl StrategyKind {
    /// Returns the notation name used in messages and reports.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Dash => "dash",
            StrategyKind::Space => "space",
            StrategyKind::BPrefix => "b-prefix",
            StrategyKind::XPlaceholder => "x-placeholder",
            StrategyKind::NumberFirst => "number-first",
            StrategyKind::MixedPhase => "mixed-phase",
            StrategyKind::PureAlloy => "pure-alloy",
            StrategyKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A structured, normalized cermet composition.
///
/// Values are built once by the parser and never mutated afterwards.
///
/// When `success` is `true` and `requires_external_data` is `false`:
/// - the known ceramic weight percents and `binder_wt_pct` sum to 100
/// - `binder_elements` holds atomic fractions summing to 1
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use cermet_core::{ParsedComposition, StrategyKind};
///
/// let composition = ParsedComposition::success(StrategyKind::Dash, "Parsed dash format")
///     .with_ceramic_elements(BTreeMap::from([("WC".to_string(), Some(90.0))]))
///     .with_binder_elements(BTreeMap::from([("Co".to_string(), 1.0)]))
///     .with_binder_wt_pct(Some(10.0));
///
/// assert!(composition.is_fully_resolved());
/// assert_eq!(composition.ceramic_wt_pct(), Some(90.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedComposition {
    success: bool,
    message: String,
    ceramic_formula: Option<String>,
    ceramic_elements: BTreeMap<String, Option<f64>>,
    binder_elements: BTreeMap<String, f64>,
    binder_wt_pct: Option<f64>,
    binder_formula: String,
    secondary_phase: Option<String>,
    requires_external_data: bool,
    is_hea: bool,
    issue: Option<IssueKind>,
    strategy: Option<StrategyKind>,
}

impl ParsedComposition {
    /// Starts a successful result produced by `strategy`.
    pub fn success(strategy: StrategyKind, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ceramic_formula: None,
            ceramic_elements: BTreeMap::new(),
            binder_elements: BTreeMap::new(),
            binder_wt_pct: None,
            binder_formula: String::new(),
            secondary_phase: None,
            requires_external_data: false,
            is_hea: false,
            issue: None,
            strategy: Some(strategy),
        }
    }

    /// Creates a failed result carrying `issue`.
    pub fn failure(issue: IssueKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ceramic_formula: None,
            ceramic_elements: BTreeMap::new(),
            binder_elements: BTreeMap::new(),
            binder_wt_pct: None,
            binder_formula: String::new(),
            secondary_phase: None,
            requires_external_data: false,
            is_hea: false,
            issue: Some(issue),
            strategy: None,
        }
    }

    pub fn with_ceramic_formula(mut self, formula: Option<String>) -> Self {
        self.ceramic_formula = formula;
        self
    }

    pub fn with_ceramic_elements(mut self, elements: BTreeMap<String, Option<f64>>) -> Self {
        self.ceramic_elements = elements;
        self
    }

    pub fn with_binder_elements(mut self, elements: BTreeMap<String, f64>) -> Self {
        self.binder_elements = elements;
        self
    }

    pub fn with_binder_wt_pct(mut self, binder_wt_pct: Option<f64>) -> Self {
        self.binder_wt_pct = binder_wt_pct;
        self
    }

    pub fn with_binder_formula(mut self, formula: impl Into<String>) -> Self {
        self.binder_formula = formula.into();
        self
    }

    pub fn with_secondary_phase(mut self, phase: Option<String>) -> Self {
        self.secondary_phase = phase;
        self
    }

    /// Marks the result as waiting for caller-supplied data.
    ///
    /// This also records [`IssueKind::IncompleteData`] unless another issue
    /// is already set.
    pub fn with_requires_external_data(mut self, required: bool) -> Self {
        self.requires_external_data = required;
        if required && self.issue.is_none() {
            self.issue = Some(IssueKind::IncompleteData);
        }
        self
    }

    pub fn with_hea(mut self, is_hea: bool) -> Self {
        self.is_hea = is_hea;
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Returns `true` if the string was recognized.
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The primary ceramic hard phase, if any.
    pub fn ceramic_formula(&self) -> Option<&str> {
        self.ceramic_formula.as_deref()
    }

    /// Ceramic formulas mapped to weight percent; `None` marks an
    /// unresolved quantity.
    pub fn ceramic_elements(&self) -> &BTreeMap<String, Option<f64>> {
        &self.ceramic_elements
    }

    /// Binder elements mapped to atomic fraction.
    pub fn binder_elements(&self) -> &BTreeMap<String, f64> {
        &self.binder_elements
    }

    pub fn binder_wt_pct(&self) -> Option<f64> {
        self.binder_wt_pct
    }

    pub fn binder_formula(&self) -> &str {
        &self.binder_formula
    }

    pub fn secondary_phase(&self) -> Option<&str> {
        self.secondary_phase.as_deref()
    }

    pub fn requires_external_data(&self) -> bool {
        self.requires_external_data
    }

    pub fn is_hea(&self) -> bool {
        self.is_hea
    }

    pub fn issue(&self) -> Option<IssueKind> {
        self.issue
    }

    pub fn strategy(&self) -> Option<StrategyKind> {
        self.strategy
    }

    /// Number of distinct binder elements.
    pub fn element_count(&self) -> usize {
        self.binder_elements.len()
    }

    /// Total ceramic weight percent, or `None` if any ceramic quantity is
    /// unresolved or there is no ceramic phase.
    pub fn ceramic_wt_pct(&self) -> Option<f64> {
        if self.ceramic_elements.is_empty() {
            return None;
        }
        self.ceramic_elements
            .values()
            .try_fold(0.0, |total, value| value.map(|v| total + v))
    }

    /// Returns `true` if parsing succeeded and every quantity is known.
    pub fn is_fully_resolved(&self) -> bool {
        self.success
            && !self.requires_external_data
            && self.binder_wt_pct.is_some()
            && self.ceramic_elements.values().all(Option::is_some)
    }
}
