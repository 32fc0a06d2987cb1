//! Fills in quantities a strategy left open.
//!
//! Percentages of a composition add up to 100, so a single missing quantity
//! can be derived from the others. Several unknown ceramics share their
//! remainder equally. When both the binder and a ceramic are unknown the
//! composition is ambiguous.

use log::trace;

use cermet_core::IssueKind;

use crate::raw::RawPhaseResult;

/// Resolves the unknown quantities of `raw`.
///
/// Results that need external data pass through untouched. Remainders
/// within `tolerance` below zero are clamped to zero.
///
/// # Errors
///
/// - [`IssueKind::AmbiguousQuantity`] when the quantities cannot be
///   determined from the input.
/// - [`IssueKind::InconsistentQuantities`] when the known quantities already
///   exceed 100%.
pub fn infer(mut raw: RawPhaseResult, tolerance: f64) -> Result<RawPhaseResult, IssueKind> {
    if raw.requires_external_data {
        return Ok(raw);
    }

    let known = raw.known_ceramic_total();
    let unknown = raw.unknown_ceramics();
    match (unknown.is_empty(), raw.binder_wt_pct) {
        (true, Some(_)) => {}
        (true, None) => {
            if raw.ceramic.is_empty() {
                return Err(IssueKind::AmbiguousQuantity);
            }
            let binder = remainder(100.0 - known, tolerance)?;
            trace!(binder; "Inferred binder weight percent");
            raw.binder_wt_pct = Some(binder);
        }
        (false, Some(binder)) => {
            let rest = remainder(100.0 - binder - known, tolerance)?;
            let share = rest / unknown.len() as f64;
            trace!(share, count = unknown.len(); "Inferred ceramic weight percent");
            for formula in &unknown {
                if let Some(value) = raw.ceramic.get_mut(formula) {
                    *value = Some(share);
                }
            }
        }
        (false, None) => return Err(IssueKind::AmbiguousQuantity),
    }
    Ok(raw)
}

fn remainder(value: f64, tolerance: f64) -> Result<f64, IssueKind> {
    if value < -tolerance || !value.is_finite() {
        Err(IssueKind::InconsistentQuantities)
    } else {
        Ok(value.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use cermet_core::StrategyKind;

    use super::*;
    use crate::raw::BinderBasis;

    const TOLERANCE: f64 = 0.01;

    fn raw(ceramic: &[(&str, Option<f64>)], binder_wt_pct: Option<f64>) -> RawPhaseResult {
        let mut raw = RawPhaseResult::new(StrategyKind::Dash, BinderBasis::Atomic);
        for (formula, value) in ceramic {
            raw.ceramic.insert(formula.to_string(), *value);
        }
        raw.binder.insert("Co".to_string(), 1.0);
        raw.binder_wt_pct = binder_wt_pct;
        raw
    }

    #[test]
    fn test_binder_from_ceramic() {
        let result = infer(raw(&[("WC", Some(90.0))], None), TOLERANCE).unwrap();

        assert_approx_eq!(f64, result.binder_wt_pct.unwrap(), 10.0);
    }

    #[test]
    fn test_ceramic_from_binder() {
        let result = infer(raw(&[("WC", None)], Some(25.0)), TOLERANCE).unwrap();

        assert_approx_eq!(f64, result.ceramic["WC"].unwrap(), 75.0);
    }

    #[test]
    fn test_remainder_shared_by_unknown_ceramics() {
        let input = raw(&[("WC", None), ("VC", Some(10.0)), ("TiC", None)], Some(10.0));
        let result = infer(input, TOLERANCE).unwrap();

        assert_approx_eq!(f64, result.ceramic["WC"].unwrap(), 40.0);
        assert_approx_eq!(f64, result.ceramic["TiC"].unwrap(), 40.0);
        assert_eq!(result.ceramic["VC"], Some(10.0));
    }

    #[test]
    fn test_resolved_input_is_unchanged() {
        let input = raw(&[("WC", Some(85.0))], Some(15.0));

        assert_eq!(infer(input.clone(), TOLERANCE).unwrap(), input);
    }

    #[test]
    fn test_external_data_passes_through() {
        let mut input = raw(&[("WC", None)], None);
        input.requires_external_data = true;

        assert_eq!(infer(input.clone(), TOLERANCE).unwrap(), input);
    }

    #[test]
    fn test_ambiguous_quantities() {
        assert_eq!(
            infer(raw(&[("WC", None)], None), TOLERANCE),
            Err(IssueKind::AmbiguousQuantity)
        );
        assert_eq!(
            infer(raw(&[], None), TOLERANCE),
            Err(IssueKind::AmbiguousQuantity)
        );
    }

    #[test]
    fn test_overfull_quantities() {
        assert_eq!(
            infer(raw(&[("WC", Some(120.0))], None), TOLERANCE),
            Err(IssueKind::InconsistentQuantities)
        );
        assert_eq!(
            infer(raw(&[("WC", None)], Some(101.0)), TOLERANCE),
            Err(IssueKind::InconsistentQuantities)
        );
    }

    #[test]
    fn test_remainder_within_tolerance_is_clamped() {
        let result = infer(raw(&[("WC", Some(100.005))], None), TOLERANCE).unwrap();

        assert_eq!(result.binder_wt_pct, Some(0.0));
    }
}
