use cermet_core::{IssueKind, StrategyKind};

use super::{Strategy, StrategyContext};
use crate::{
    formula::{parse_binder, split_leading_quantity},
    raw::{BinderBasis, RawPhaseResult},
    tokens::Token,
};

/// `<ceramic_pct?><ceramic>-<binder_pct?><binder composition>`, e.g.
/// `WC-10CoCrFeNi` or `80TiC-20Mo`.
///
/// A side without a percentage is left for inference.
#[derive(Debug, Default, Clone, Copy)]
pub struct DashStrategy;

impl Strategy for DashStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Dash
    }

    fn try_parse(
        &self,
        ctx: &StrategyContext<'_>,
        _tokens: &[Token<'_>],
        input: &str,
    ) -> Option<RawPhaseResult> {
        let (ceramic_part, binder_part) = input.split_once('-')?;
        if binder_part.contains('-') {
            return None;
        }

        let (ceramic_pct, formula) = split_leading_quantity(ceramic_part);
        if formula.is_empty() {
            return None;
        }
        if !ctx.registry().is_ceramic(formula) {
            return ctx.reject(self.kind(), IssueKind::UnknownPhaseSymbol, formula);
        }

        let (binder_pct, binder_text) = split_leading_quantity(binder_part);
        let binder = match parse_binder(binder_text, ctx.registry()) {
            Ok(binder) => binder,
            Err(issue) => return ctx.reject(self.kind(), issue, binder_text),
        };

        let mut raw = RawPhaseResult::new(self.kind(), BinderBasis::Atomic);
        raw.ceramic.insert(formula.to_string(), ceramic_pct);
        raw.binder = binder;
        raw.binder_wt_pct = binder_pct;
        raw.primary = Some(formula.to_string());
        Some(raw)
    }
}
