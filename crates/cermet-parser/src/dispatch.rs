//! Strategy dispatch and result assembly.

use std::{collections::BTreeMap, fmt, sync::Arc};

use log::{debug, trace};

use cermet_core::{
    IssueKind, ParsedComposition, Registry, StrategyKind,
    convert::{
        binder_density, normalize_fractions, volume_to_weight_pct, weight_to_atomic,
    },
    formula::normalize_formula,
};

use crate::{
    config::ParserConfig,
    infer::infer,
    normalize::normalize,
    raw::{BinderBasis, RawPhaseResult},
    strategy::{Strategy, StrategyContext, default_strategies},
    tokenizer::tokenize,
};

/// Parses composition strings by trying each strategy in order.
///
/// The parser holds no mutable state, so one instance can be shared across
/// threads and reused for any number of inputs.
///
/// # Example
///
/// ```
/// use cermet_parser::CompositionParser;
///
/// let parser = CompositionParser::default();
/// let result = parser.parse("WC-10CoCrFeNi");
///
/// assert!(result.is_success());
/// assert_eq!(result.ceramic_formula(), Some("WC"));
/// assert_eq!(result.binder_wt_pct(), Some(10.0));
/// assert!(result.is_hea());
/// ```
pub struct CompositionParser {
    registry: Arc<Registry>,
    config: ParserConfig,
    strategies: Vec<Box<dyn Strategy>>,
}

impl Default for CompositionParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl fmt::Debug for CompositionParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositionParser")
            .field("config", &self.config)
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.kind()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl CompositionParser {
    /// Creates a parser with the built-in registry and strategies.
    pub fn new(config: ParserConfig) -> Self {
        Self {
            registry: Registry::shared(),
            config,
            strategies: default_strategies(),
        }
    }

    /// Replaces the reference tables.
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the strategies; they are tried in the given order.
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn Strategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses one composition string.
    ///
    /// Never panics; unrecognized input yields a failed result with an
    /// issue code.
    pub fn parse(&self, input: &str) -> ParsedComposition {
        self.parse_with_volume(input, None)
    }

    /// Parses one composition string, using `binder_vol_pct` to resolve a
    /// binder quantity the string leaves open.
    ///
    /// The volume percent only applies to `x`-placeholder compositions
    /// without quantities, such as `WC x Co`.
    pub fn parse_with_volume(&self, input: &str, binder_vol_pct: Option<f64>) -> ParsedComposition {
        let normalized = normalize(input);
        let tokens = tokenize(&normalized);
        trace!(input = normalized.as_str(), tokens:?; "Tokenized composition");

        let ctx = StrategyContext::new(&self.registry, &self.config);
        for strategy in &self.strategies {
            let kind = strategy.kind();
            let Some(raw) = strategy.try_parse(&ctx, &tokens, &normalized) else {
                debug!(strategy = kind.name(); "Strategy declined");
                continue;
            };
            if let Err(reason) = self.check_consistency(&raw) {
                ctx.reject::<()>(kind, IssueKind::InconsistentQuantities, reason);
                continue;
            }
            debug!(strategy = kind.name(); "Strategy matched");
            return self.finish(raw, binder_vol_pct);
        }

        let issue = ctx.rejection().unwrap_or(IssueKind::UnrecognizedFormat);
        debug!(input = normalized.as_str(), issue:?; "No strategy matched");
        ParsedComposition::failure(issue, format!("Unable to parse composition: {input}"))
    }

    /// Checks the invariants every strategy result must hold.
    fn check_consistency(&self, raw: &RawPhaseResult) -> Result<(), &'static str> {
        let valid = |value: f64| value.is_finite() && value >= 0.0;
        let tolerance = self.config.sum_tolerance();

        if !raw.ceramic.values().flatten().all(|value| valid(*value)) {
            return Err("invalid ceramic quantity");
        }
        if raw.binder_wt_pct.is_some_and(|value| !valid(value)) {
            return Err("invalid binder quantity");
        }
        if raw.binder.is_empty() || !raw.binder.values().all(|value| valid(*value)) {
            return Err("invalid binder composition");
        }
        if !(raw.binder.values().sum::<f64>() > 0.0) {
            return Err("empty binder composition");
        }

        let known = raw.known_ceramic_total() + raw.binder_wt_pct.unwrap_or(0.0);
        if known > 100.0 + tolerance {
            return Err("quantities exceed 100%");
        }
        if raw.is_resolved() && !raw.requires_external_data && (known - 100.0).abs() > tolerance
        {
            return Err("quantities do not add up to 100%");
        }
        if raw
            .primary
            .as_deref()
            .is_some_and(|primary| !self.registry.is_ceramic(primary))
        {
            return Err("unknown primary phase");
        }
        Ok(())
    }

    fn finish(&self, raw: RawPhaseResult, binder_vol_pct: Option<f64>) -> ParsedComposition {
        let kind = raw.strategy;
        let tolerance = self.config.sum_tolerance();

        let mut raw = match infer(raw, tolerance) {
            Ok(raw) => raw,
            Err(issue) => return inference_failure(kind, issue),
        };
        if let Some(volume) = binder_vol_pct {
            raw = match self.resolve_volume(raw, volume) {
                Ok(raw) => raw,
                Err(issue) => return inference_failure(kind, issue),
            };
        }

        let fractions = match raw.basis {
            BinderBasis::Weight => weight_to_atomic(&raw.binder, &self.registry),
            BinderBasis::Atomic => normalize_fractions(&raw.binder),
        };
        let binder_formula = normalize_formula(&fractions);
        let is_hea = fractions.len() >= self.config.hea_min_elements();

        let message = if raw.requires_external_data {
            format!("Parsed {kind} format (binder wt% missing)")
        } else {
            format!("Parsed {kind} format")
        };
        let ceramic_elements: BTreeMap<_, _> = raw.ceramic.into_iter().collect();

        ParsedComposition::success(kind, message)
            .with_ceramic_formula(raw.primary)
            .with_ceramic_elements(ceramic_elements)
            .with_binder_elements(fractions)
            .with_binder_wt_pct(raw.binder_wt_pct)
            .with_binder_formula(binder_formula)
            .with_secondary_phase(raw.secondary)
            .with_hea(is_hea)
            .with_requires_external_data(raw.requires_external_data)
    }

    /// Turns a binder volume percent into the missing binder weight percent.
    fn resolve_volume(
        &self,
        mut raw: RawPhaseResult,
        volume: f64,
    ) -> Result<RawPhaseResult, IssueKind> {
        if raw.strategy != StrategyKind::XPlaceholder || !raw.requires_external_data {
            debug!(volume; "Binder volume percent not needed");
            return Ok(raw);
        }

        let atomic = normalize_fractions(&raw.binder);
        let rho_binder = binder_density(
            &atomic,
            &self.registry,
            self.config.default_binder_density(),
        );
        let rho_ceramic = raw
            .primary
            .as_deref()
            .and_then(|primary| self.registry.density(primary))
            .unwrap_or(self.config.default_ceramic_density());

        let Some(weight) = volume_to_weight_pct(volume, rho_binder, rho_ceramic) else {
            debug!(volume; "Binder volume percent out of range");
            return Ok(raw);
        };
        debug!(volume, weight, rho_binder, rho_ceramic; "Converted binder volume to weight");

        raw.binder_wt_pct = Some(weight);
        raw.requires_external_data = false;
        infer(raw, self.config.sum_tolerance())
    }
}

fn inference_failure(kind: StrategyKind, issue: IssueKind) -> ParsedComposition {
    debug!(strategy = kind.name(), issue:?; "Quantity inference failed");
    ParsedComposition::failure(issue, format!("{issue} in {kind} format")).with_strategy(kind)
}

/// Parses `input` with the built-in registry and default settings.
///
/// # Example
///
/// ```
/// let result = cermet_parser::parse("b WC 25 Co");
///
/// assert_eq!(result.ceramic_elements()["WC"], Some(75.0));
/// assert_eq!(result.binder_formula(), "Co1");
/// ```
pub fn parse(input: &str) -> ParsedComposition {
    CompositionParser::default().parse(input)
}
