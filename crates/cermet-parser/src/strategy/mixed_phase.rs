use std::collections::BTreeMap;

use cermet_core::{IssueKind, StrategyKind, convert::atomic_to_weight};

use super::{Strategy, StrategyContext, largest};
use crate::{
    config::ImplicitQuantityPolicy,
    formula::parse_alloy,
    raw::{BinderBasis, RawPhaseResult},
    tokens::Token,
};

/// Several ceramics and binders, each optionally preceded by its weight
/// percent, e.g. `WC 10 VC 9.6 Co 0.4 Ru`.
///
/// A ceramic without a number is implicit. How implicit ceramics are read
/// depends on the explicit quantities:
///
/// - minor additives (below the configured threshold): the first implicit
///   ceramic is the primary phase and takes the remainder;
/// - a substantial explicit total: the remainder is shared among the
///   implicit ceramics, and the largest phase becomes primary;
/// - otherwise every quantity is scaled so the total is 100, counting each
///   implicit ceramic as 1.
///
/// Explicit quantities that leave nothing for an implicit ceramic, or that
/// add up to more than 100 on their own, are inconsistent and the strategy
/// declines. A ceramic given as 0 is absent and is dropped.
///
/// Binder amounts are weight percents and every binder needs one.
#[derive(Debug, Default, Clone, Copy)]
pub struct MixedPhaseStrategy;

#[derive(Debug)]
enum EntryPhase {
    Ceramic,
    /// Atomic fractions of the alloy.
    Binder(BTreeMap<String, f64>),
}

#[derive(Debug)]
struct Entry<'t> {
    formula: &'t str,
    phase: EntryPhase,
    value: Option<f64>,
}

/// Weight used for an implicit ceramic when everything is rescaled.
const IMPLICIT_WEIGHT: f64 = 1.0;

impl Strategy for MixedPhaseStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MixedPhase
    }

    fn try_parse(
        &self,
        ctx: &StrategyContext<'_>,
        tokens: &[Token<'_>],
        _input: &str,
    ) -> Option<RawPhaseResult> {
        let registry = ctx.registry();
        let config = ctx.config();

        let mut entries: Vec<Entry<'_>> = Vec::new();
        let mut pending = None;
        for token in tokens {
            if token.is_placeholder() {
                return None;
            }
            if let Some(value) = token.number() {
                if pending.replace(value).is_some() {
                    return None;
                }
                continue;
            }
            let phase = if registry.is_ceramic(token.text()) {
                if entries.iter().any(|entry| entry.formula == token.text()) {
                    return None;
                }
                EntryPhase::Ceramic
            } else {
                EntryPhase::Binder(parse_alloy(token.text(), registry)?)
            };
            entries.push(Entry {
                formula: token.text(),
                phase,
                value: pending.take(),
            });
        }
        // `Ni Co 8`: a trailing number belongs to the last phase.
        if let Some(value) = pending {
            let last = entries.last_mut()?;
            if last.value.is_some() {
                return None;
            }
            last.value = Some(value);
        }

        let mut raw = RawPhaseResult::new(self.kind(), BinderBasis::Weight);
        let mut implicit = Vec::new();
        let mut binder_total = 0.0;
        for entry in entries {
            match entry.phase {
                EntryPhase::Ceramic => match entry.value {
                    Some(value) if value == 0.0 => {}
                    None => {
                        implicit.push(entry.formula);
                        raw.ceramic.insert(entry.formula.to_string(), None);
                    }
                    value => {
                        raw.ceramic.insert(entry.formula.to_string(), value);
                    }
                },
                EntryPhase::Binder(fractions) => {
                    let value = entry.value?;
                    for (symbol, weight) in atomic_to_weight(&fractions, registry) {
                        *raw.binder.entry(symbol).or_insert(0.0) += weight * value;
                    }
                    binder_total += value;
                }
            }
        }
        if raw.ceramic.is_empty() || raw.binder.is_empty() {
            return None;
        }

        let additives = raw.known_ceramic_total();
        let explicit_total = additives + binder_total;

        let tolerance = config.sum_tolerance();
        let overfull = if implicit.is_empty() {
            explicit_total > 100.0 + tolerance
        } else {
            explicit_total >= 100.0 - tolerance
        };
        if overfull {
            return ctx.reject(
                self.kind(),
                IssueKind::InconsistentQuantities,
                "explicit quantities leave no room",
            );
        }

        if let Some(&first) = implicit.first() {
            if config.implicit_quantity() == ImplicitQuantityPolicy::MissingData {
                raw.primary = Some(first.to_string());
                raw.secondary = largest_additive(&raw);
                raw.binder_wt_pct = Some(binder_total);
                raw.requires_external_data = true;
                return Some(raw);
            }

            if additives < config.minor_additive_threshold() {
                raw.primary = Some(first.to_string());
                raw.secondary = largest_additive(&raw);
                raw.binder_wt_pct = Some(binder_total);
                return Some(raw);
            }
            if explicit_total > config.remainder_min_total() {
                let share = (100.0 - explicit_total) / implicit.len() as f64;
                raw.primary = largest(
                    raw.ceramic
                        .iter()
                        .map(|(formula, value)| (formula.as_str(), value.unwrap_or(share))),
                );
                raw.binder_wt_pct = Some(binder_total);
                return Some(raw);
            }
        }

        let ceramic_total: f64 = raw
            .ceramic
            .values()
            .map(|value| value.unwrap_or(IMPLICIT_WEIGHT))
            .sum();
        let total = ceramic_total + binder_total;
        if !(total > 0.0) {
            return None;
        }
        let scale = 100.0 / total;
        for value in raw.ceramic.values_mut() {
            *value = Some(value.unwrap_or(IMPLICIT_WEIGHT) * scale);
        }
        raw.binder_wt_pct = Some(binder_total * scale);
        raw.primary = largest(
            raw.ceramic
                .iter()
                .filter_map(|(formula, value)| value.map(|value| (formula.as_str(), value))),
        );
        Some(raw)
    }
}

/// The largest ceramic with a positive explicit quantity.
fn largest_additive(raw: &RawPhaseResult) -> Option<String> {
    largest(raw.ceramic.iter().filter_map(|(formula, value)| {
        value
            .filter(|value| *value > 0.0)
            .map(|value| (formula.as_str(), value))
    }))
}
