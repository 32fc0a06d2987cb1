use cermet_core::{Classification, IssueKind, StrategyKind};

use super::{Strategy, StrategyContext, largest};
use crate::{
    raw::{BinderBasis, RawPhaseResult},
    tokens::Token,
};

/// Alternating `<formula> <number>` pairs, e.g. `WC 85 Co 10 Ni 5`.
///
/// Ceramic numbers are weight percent. Binder numbers are read as atomic
/// percent and only their ratios are kept. The binder weight is whatever the
/// ceramics leave of 100.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpaceStrategy;

impl Strategy for SpaceStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Space
    }

    fn try_parse(
        &self,
        ctx: &StrategyContext<'_>,
        tokens: &[Token<'_>],
        _input: &str,
    ) -> Option<RawPhaseResult> {
        if tokens.len() < 3 || tokens.len() % 2 != 0 {
            return None;
        }

        let classifier = ctx.classifier();
        let mut raw = RawPhaseResult::new(self.kind(), BinderBasis::Atomic);
        for pair in tokens.chunks_exact(2) {
            let [formula, amount] = pair else {
                return None;
            };
            if formula.is_number() || formula.is_placeholder() {
                return None;
            }
            let value = amount.number()?;

            match classifier.classify(formula.text()) {
                Classification::Ceramic => {
                    let entry = raw
                        .ceramic
                        .entry(formula.text().to_string())
                        .or_insert(Some(0.0));
                    *entry = entry.map(|total| total + value);
                }
                Classification::Binder => {
                    *raw.binder.entry(formula.text().to_string()).or_insert(0.0) +=
                        value / 100.0;
                }
                Classification::Unknown => {
                    return ctx.reject(self.kind(), IssueKind::UnknownPhaseSymbol, formula.text());
                }
            }
        }

        if raw.ceramic.is_empty() || raw.binder.is_empty() {
            return None;
        }

        raw.binder_wt_pct = Some(100.0 - raw.known_ceramic_total());
        raw.primary = largest(
            raw.ceramic
                .iter()
                .filter_map(|(formula, value)| value.map(|v| (formula.as_str(), v))),
        );
        Some(raw)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::strategy::run_strategy;

    #[test]
    fn test_ceramic_and_binder_pairs() {
        let raw = run_strategy(&SpaceStrategy, "WC 85 Co 10 Ni 5").unwrap();

        assert_eq!(raw.ceramic.get("WC"), Some(&Some(85.0)));
        assert_approx_eq!(f64, raw.binder_wt_pct.unwrap(), 15.0);
        assert_approx_eq!(f64, raw.binder["Co"], 0.1);
        assert_approx_eq!(f64, raw.binder["Ni"], 0.05);
        assert_eq!(raw.basis, BinderBasis::Atomic);
    }

    #[test]
    fn test_primary_is_largest_ceramic() {
        let raw = run_strategy(&SpaceStrategy, "TiC 20 WC 60 Co 20").unwrap();

        assert_eq!(raw.primary.as_deref(), Some("WC"));
        assert_eq!(
            raw.ceramic.keys().collect::<Vec<_>>(),
            ["TiC", "WC"]
        );
    }

    #[test]
    fn test_comma_separated_pairs() {
        let raw = run_strategy(&SpaceStrategy, "WC 90, Co 10").unwrap();

        assert_approx_eq!(f64, raw.binder_wt_pct.unwrap(), 10.0);
    }

    #[test]
    fn test_declines_other_shapes() {
        assert!(run_strategy(&SpaceStrategy, "90 WC 10 Co").is_none());
        assert!(run_strategy(&SpaceStrategy, "WC 85 Co").is_none());
        assert!(run_strategy(&SpaceStrategy, "Co 50 Ni 50").is_none());
        assert!(run_strategy(&SpaceStrategy, "WC 85 Xy 15").is_none());
        assert!(run_strategy(&SpaceStrategy, "WC x Co 10").is_none());
        assert!(run_strategy(&SpaceStrategy, "").is_none());
    }
}
