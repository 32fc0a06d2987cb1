use log::debug;

use cermet_core::StrategyKind;

use super::{Strategy, StrategyContext, join_texts};
use crate::{
    formula::parse_formula,
    raw::{BinderBasis, RawPhaseResult},
    tokens::Token,
};

/// A binder-only alloy without a hard phase, e.g. `CoCrFeNi` or
/// `Cr20 Fe20 Mn20 Ni40`.
///
/// The whole input must be element notation, and binder metals must make up
/// at least the configured share of the atoms. Other elements are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct PureAlloyStrategy;

impl Strategy for PureAlloyStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PureAlloy
    }

    fn try_parse(
        &self,
        ctx: &StrategyContext<'_>,
        tokens: &[Token<'_>],
        _input: &str,
    ) -> Option<RawPhaseResult> {
        let registry = ctx.registry();
        if tokens.iter().any(|token| registry.is_ceramic(token.text())) {
            return None;
        }

        let amounts = parse_formula(&join_texts(tokens))?;
        let total: f64 = amounts.values().sum();
        let mut raw = RawPhaseResult::new(self.kind(), BinderBasis::Atomic);
        raw.binder = amounts
            .into_iter()
            .filter(|(symbol, _)| registry.is_binder_metal(symbol))
            .collect();

        let binder_fraction = raw.binder.values().sum::<f64>() / total;
        if !(binder_fraction >= ctx.config().pure_alloy_min_binder_fraction()) {
            debug!(binder_fraction; "Too few binder atoms for a pure alloy");
            return None;
        }

        raw.binder_wt_pct = Some(100.0);
        Some(raw)
    }
}
