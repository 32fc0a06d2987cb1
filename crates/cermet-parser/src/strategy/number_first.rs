use cermet_core::{IssueKind, StrategyKind};

use super::{Strategy, StrategyContext, join_texts};
use crate::{
    formula::parse_binder,
    raw::{BinderBasis, RawPhaseResult},
    tokens::Token,
};

/// `<ceramic_pct> <ceramic> <binder_pct> <binder composition>`, e.g.
/// `90 WC 10 Co` or `85 WC 15 CoCrFeNi`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberFirstStrategy;

impl Strategy for NumberFirstStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::NumberFirst
    }

    fn try_parse(
        &self,
        ctx: &StrategyContext<'_>,
        tokens: &[Token<'_>],
        _input: &str,
    ) -> Option<RawPhaseResult> {
        let [ceramic_pct, ceramic, binder_pct, binder @ ..] = tokens else {
            return None;
        };
        let ceramic_pct = ceramic_pct.number()?;
        let binder_pct = binder_pct.number()?;
        if binder.is_empty() || ceramic.is_number() {
            return None;
        }

        let registry = ctx.registry();
        if !registry.is_ceramic(ceramic.text()) {
            return ctx.reject(self.kind(), IssueKind::UnknownPhaseSymbol, ceramic.text());
        }
        // A second hard phase means a mixed notation.
        if binder
            .iter()
            .any(|token| token.is_placeholder() || registry.is_ceramic(token.text()))
        {
            return None;
        }

        let binder_text = join_texts(binder);
        let binder = match parse_binder(&binder_text, registry) {
            Ok(binder) => binder,
            Err(issue) => return ctx.reject(self.kind(), issue, &binder_text),
        };

        let mut raw = RawPhaseResult::new(self.kind(), BinderBasis::Atomic);
        raw.ceramic
            .insert(ceramic.text().to_string(), Some(ceramic_pct));
        raw.primary = Some(ceramic.text().to_string());
        raw.binder = binder;
        raw.binder_wt_pct = Some(binder_pct);
        Some(raw)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::strategy::run_strategy;

    #[test]
    fn test_percentages_first() {
        let raw = run_strategy(&NumberFirstStrategy, "90 WC 10 Co").unwrap();

        assert_eq!(raw.ceramic.get("WC"), Some(&Some(90.0)));
        assert_eq!(raw.binder_wt_pct, Some(10.0));
        assert_approx_eq!(f64, raw.binder["Co"], 1.0);
    }

    #[test]
    fn test_multi_element_binder() {
        let raw = run_strategy(&NumberFirstStrategy, "85 WC, 15 CoCrFeNiMo").unwrap();

        assert_eq!(raw.binder.len(), 5);
        assert_approx_eq!(f64, raw.binder["Mo"], 0.2);
    }

    #[test]
    fn test_declines_other_shapes() {
        assert!(run_strategy(&NumberFirstStrategy, "WC 90 Co 10").is_none());
        assert!(run_strategy(&NumberFirstStrategy, "90 WC 10").is_none());
        assert!(run_strategy(&NumberFirstStrategy, "90 Xy 10 Co").is_none());
        assert!(run_strategy(&NumberFirstStrategy, "90 WC 10 Co 5 TiC").is_none());
        assert!(run_strategy(&NumberFirstStrategy, "90 WC 10 ###").is_none());
    }
}
