//! Binder composition sub-parser.
//!
//! Reads element-amount notation such as `CoCrFeNi`, `Al0.5CoCrFeNi`,
//! `Co20Ni10`, `Co:2 Ni:1` or `Cr20 Fe20 Mn20 Ni40`. An element symbol is an
//! uppercase ASCII letter optionally followed by one lowercase letter. Its
//! amount may follow directly, after `:`, or after spaces; a symbol without
//! an amount counts as 1.

use std::collections::BTreeMap;

use log::trace;
use winnow::{
    Parser as _,
    ascii::{space0, space1},
    combinator::{alt, opt, preceded, repeat, terminated},
    error::ModalResult,
    token::{any, one_of},
};

use cermet_core::{IssueKind, Registry, convert::normalize_fractions};

use crate::tokenizer::number_text;

/// Amount assumed for an element written without one.
pub const IMPLICIT_AMOUNT: f64 = 1.0;

type Item<'a> = (&'a str, Option<f64>);

fn element_symbol<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_uppercase()),
        opt(one_of(|c: char| c.is_ascii_lowercase())),
    )
        .take()
        .parse_next(input)
}

fn amount(input: &mut &str) -> ModalResult<f64> {
    preceded((space0, opt(':'), space0), number_text)
        .verify_map(|digits: &str| digits.parse::<f64>().ok())
        .parse_next(input)
}

fn item<'a>(input: &mut &'a str) -> ModalResult<Item<'a>> {
    (element_symbol, opt(amount)).parse_next(input)
}

/// Every character must belong to an item; items may be space separated.
fn strict_items<'a>(input: &mut &'a str) -> ModalResult<Vec<Item<'a>>> {
    preceded(space0, repeat(1.., terminated(item, space0))).parse_next(input)
}

/// Collects items and skips anything that is not one.
fn lenient_items<'a>(input: &mut &'a str) -> ModalResult<Vec<Item<'a>>> {
    repeat(0.., alt((item.map(Some), space1.value(None), any.value(None))))
        .fold(Vec::new, |mut items, found| {
            if let Some(found) = found {
                items.push(found);
            }
            items
        })
        .parse_next(input)
}

fn accumulate<'a>(
    items: impl IntoIterator<Item = Item<'a>>,
    mut keep: impl FnMut(&str) -> bool,
) -> BTreeMap<String, f64> {
    let mut amounts = BTreeMap::new();
    for (symbol, amount) in items {
        let amount = amount.unwrap_or(IMPLICIT_AMOUNT);
        if keep(symbol) && amount.is_finite() && amount > 0.0 {
            *amounts.entry(symbol.to_string()).or_insert(0.0) += amount;
        }
    }
    amounts
}

/// Extracts the binder metals from `text` as atomic fractions.
///
/// Characters that cannot start an element are skipped, and elements that
/// are not registered binder metals are dropped. Repeated elements add up.
///
/// # Errors
///
/// Returns [`IssueKind::MalformedBinderComposition`] when no binder metal
/// remains.
///
/// # Example
///
/// ```
/// use cermet_core::Registry;
/// use cermet_parser::parse_binder;
///
/// let registry = Registry::default();
/// let binder = parse_binder("CoCrFeNi", &registry).unwrap();
///
/// assert_eq!(binder.len(), 4);
/// assert!((binder["Co"] - 0.25).abs() < 1e-12);
/// assert!(parse_binder("###", &registry).is_err());
/// ```
pub fn parse_binder(text: &str, registry: &Registry) -> Result<BTreeMap<String, f64>, IssueKind> {
    let mut input = text;
    let items = lenient_items(&mut input).unwrap_or_default();
    trace!(text, items:?; "Binder items");

    let fractions = normalize_fractions(&accumulate(items, |symbol| {
        registry.is_binder_metal(symbol)
    }));
    if fractions.is_empty() {
        Err(IssueKind::MalformedBinderComposition)
    } else {
        Ok(fractions)
    }
}

/// Parses `text` as a formula made only of element items.
///
/// Returns the accumulated amounts per element (not normalized), or `None`
/// if any character is not part of an item. Symbols are not checked against
/// a registry.
///
/// # Example
///
/// ```
/// use cermet_parser::parse_formula;
///
/// let amounts = parse_formula("Al0.5CoCrFeNi").unwrap();
/// assert_eq!(amounts["Al"], 0.5);
/// assert_eq!(amounts["Ni"], 1.0);
///
/// assert!(parse_formula("WC-10Co").is_none());
/// ```
pub fn parse_formula(text: &str) -> Option<BTreeMap<String, f64>> {
    let items = strict_items.parse(text).ok()?;
    let amounts = accumulate(items, |_| true);
    (!amounts.is_empty()).then_some(amounts)
}

/// Parses `text` as an alloy of registered binder metals.
///
/// Every element must be a binder metal; the result holds atomic fractions.
pub fn parse_alloy(text: &str, registry: &Registry) -> Option<BTreeMap<String, f64>> {
    let amounts = parse_formula(text)?;
    if !amounts.keys().all(|symbol| registry.is_binder_metal(symbol)) {
        return None;
    }
    let fractions = normalize_fractions(&amounts);
    (!fractions.is_empty()).then_some(fractions)
}

fn leading_quantity<'a>(input: &mut &'a str) -> ModalResult<Option<&'a str>> {
    opt(terminated(number_text, space0)).parse_next(input)
}

/// Splits an optional leading number off `text`.
///
/// `"10CoCrFeNi"` becomes `(Some(10.0), "CoCrFeNi")`, `"WC"` becomes
/// `(None, "WC")`.
pub fn split_leading_quantity(text: &str) -> (Option<f64>, &str) {
    let mut rest = text.trim();
    let quantity = leading_quantity(&mut rest)
        .ok()
        .flatten()
        .and_then(|digits| digits.parse::<f64>().ok());
    (quantity, rest.trim())
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_parse_binder_equal_shares() {
        let registry = Registry::default();
        let binder = parse_binder("CoCrFeNi", &registry).unwrap();

        for symbol in ["Co", "Cr", "Fe", "Ni"] {
            assert_approx_eq!(f64, binder[symbol], 0.25);
        }
    }

    #[test]
    fn test_parse_binder_with_amounts() {
        let registry = Registry::default();

        let binder = parse_binder("Al0.5CoCrFeNi", &registry).unwrap();
        assert_approx_eq!(f64, binder["Al"], 0.5 / 4.5);
        assert_approx_eq!(f64, binder["Co"], 1.0 / 4.5);

        let binder = parse_binder("Co:2 Ni:1", &registry).unwrap();
        assert_approx_eq!(f64, binder["Co"], 2.0 / 3.0);

        let binder = parse_binder("Co 60 Ni 40", &registry).unwrap();
        assert_approx_eq!(f64, binder["Ni"], 0.4);
    }

    #[test]
    fn test_parse_binder_drops_non_binder_elements() {
        let registry = Registry::default();
        let binder = parse_binder("Co6C", &registry).unwrap();

        assert_eq!(binder.len(), 1);
        assert_approx_eq!(f64, binder["Co"], 1.0);
    }

    #[test]
    fn test_parse_binder_accumulates_repeats() {
        let registry = Registry::default();
        let binder = parse_binder("CoNiCo", &registry).unwrap();

        assert_approx_eq!(f64, binder["Co"], 2.0 / 3.0);
    }

    #[test]
    fn test_parse_binder_skips_noise() {
        let registry = Registry::default();
        let binder = parse_binder("(Co)+ni Fe", &registry).unwrap();

        assert_eq!(binder.keys().collect::<Vec<_>>(), ["Co", "Fe"]);
    }

    #[test]
    fn test_parse_binder_malformed() {
        let registry = Registry::default();

        assert_eq!(
            parse_binder("", &registry),
            Err(IssueKind::MalformedBinderComposition)
        );
        assert_eq!(
            parse_binder("xyz 123", &registry),
            Err(IssueKind::MalformedBinderComposition)
        );
        assert_eq!(
            parse_binder("Co0", &registry),
            Err(IssueKind::MalformedBinderComposition)
        );
    }

    #[test]
    fn test_parse_formula_is_strict() {
        let amounts = parse_formula("Cr20 Fe20 Mn20 Ni40").unwrap();
        assert_approx_eq!(f64, amounts["Ni"], 40.0);

        assert!(parse_formula("CoCrFeNi!").is_none());
        assert!(parse_formula("90").is_none());
        assert!(parse_formula("").is_none());
        assert!(parse_formula("co").is_none());
    }

    #[test]
    fn test_parse_alloy_requires_binder_metals() {
        let registry = Registry::default();

        assert!(parse_alloy("CoNi", &registry).is_some());
        assert!(parse_alloy("WC", &registry).is_none());
        assert!(parse_alloy("CoNiX", &registry).is_none());
    }

    #[test]
    fn test_split_leading_quantity() {
        assert_eq!(
            split_leading_quantity("10CoCrFeNi"),
            (Some(10.0), "CoCrFeNi")
        );
        assert_eq!(split_leading_quantity("90 WC"), (Some(90.0), "WC"));
        assert_eq!(split_leading_quantity("WC"), (None, "WC"));
        assert_eq!(split_leading_quantity(" 12.5% Co "), (Some(12.5), "Co"));
        assert_eq!(split_leading_quantity(""), (None, ""));
    }
}
