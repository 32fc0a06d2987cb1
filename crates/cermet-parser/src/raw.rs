//! Intermediate phase maps produced by a strategy.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use cermet_core::StrategyKind;

/// Unit of the amounts in [`RawPhaseResult::binder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinderBasis {
    /// Atomic ratios; only normalization is needed.
    Atomic,
    /// Weight amounts; converted to atomic fractions with molar masses.
    Weight,
}

/// What a strategy extracted from the input, before any inference.
///
/// Ceramic entries keep the order in which they appeared. A `None` quantity
/// is left for the quantity inferencer to resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPhaseResult {
    pub strategy: StrategyKind,
    /// Ceramic formula to weight percent.
    pub ceramic: IndexMap<String, Option<f64>>,
    /// Binder element to amount, in units given by `basis`.
    pub binder: BTreeMap<String, f64>,
    pub basis: BinderBasis,
    pub binder_wt_pct: Option<f64>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub requires_external_data: bool,
}

impl RawPhaseResult {
    pub fn new(strategy: StrategyKind, basis: BinderBasis) -> Self {
        Self {
            strategy,
            ceramic: IndexMap::new(),
            binder: BTreeMap::new(),
            basis,
            binder_wt_pct: None,
            primary: None,
            secondary: None,
            requires_external_data: false,
        }
    }

    /// Sum of the known ceramic quantities.
    pub fn known_ceramic_total(&self) -> f64 {
        self.ceramic.values().flatten().sum()
    }

    /// Formulas whose quantity is still unknown.
    pub fn unknown_ceramics(&self) -> Vec<String> {
        self.ceramic
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(formula, _)| formula.clone())
            .collect()
    }

    /// Returns `true` if every ceramic quantity and the binder weight are
    /// known.
    pub fn is_resolved(&self) -> bool {
        self.binder_wt_pct.is_some() && self.ceramic.values().all(Option::is_some)
    }
}
