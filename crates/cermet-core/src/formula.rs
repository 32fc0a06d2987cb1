//! Canonical text form of a binder composition.
//!
//! Element symbols are written in alphabetical order, each followed by its
//! amount. Compositions whose amounts are small integer multiples of each
//! other are written as reduced integer ratios (`Co1Cr1Fe1Ni1`, `Co2Ni1`);
//! anything else is written in atomic percent with at most two decimals
//! (`Al8.33Co22.92Ni68.75`).

use std::{collections::BTreeMap, fmt::Write};

/// Largest coefficient written in the reduced integer form.
pub const MAX_REDUCED_COEFFICIENT: u32 = 12;

/// Relative distance from an integer ratio still treated as that integer.
const RATIO_TOLERANCE: f64 = 1e-4;

/// Renders `amounts` (atomic fractions or ratios) as a canonical formula.
///
/// Entries that are zero, negative, or not finite are dropped. An empty
/// input yields an empty string.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use cermet_core::formula::normalize_formula;
///
/// let equal = BTreeMap::from([
///     ("Ni".to_string(), 0.25),
///     ("Co".to_string(), 0.25),
///     ("Fe".to_string(), 0.25),
///     ("Cr".to_string(), 0.25),
/// ]);
/// assert_eq!(normalize_formula(&equal), "Co1Cr1Fe1Ni1");
///
/// let uneven = BTreeMap::from([("Co".to_string(), 0.5), ("Ni".to_string(), 0.3), ("Fe".to_string(), 0.2)]);
/// assert_eq!(normalize_formula(&uneven), "Co50Fe20Ni30");
/// ```
pub fn normalize_formula(amounts: &BTreeMap<String, f64>) -> String {
    let entries: Vec<(&str, f64)> = amounts
        .iter()
        .filter(|(_, value)| value.is_finite() && **value > 0.0)
        .map(|(symbol, value)| (symbol.as_str(), *value))
        .collect();

    let Some(min) = entries.iter().map(|(_, value)| *value).reduce(f64::min) else {
        return String::new();
    };

    let mut formula = String::new();
    if let Some(coefficients) = reduced_coefficients(&entries, min) {
        for ((symbol, _), coefficient) in entries.iter().zip(coefficients) {
            let _ = write!(formula, "{symbol}{coefficient}");
        }
        return formula;
    }

    let total: f64 = entries.iter().map(|(_, value)| value).sum();
    for (symbol, value) in &entries {
        let percent = round_to_hundredths(value / total * 100.0);
        if percent > 0.0 {
            let _ = write!(formula, "{symbol}{}", format_amount(percent));
        }
    }
    formula
}

/// Returns integer coefficients if every amount is a small integer multiple
/// of the smallest one.
fn reduced_coefficients(entries: &[(&str, f64)], min: f64) -> Option<Vec<u32>> {
    entries
        .iter()
        .map(|(_, value)| {
            let ratio = value / min;
            let rounded = ratio.round();
            let close = (ratio - rounded).abs() <= RATIO_TOLERANCE * rounded;
            (close && (1.0..=f64::from(MAX_REDUCED_COEFFICIENT)).contains(&rounded))
                .then_some(rounded as u32)
        })
        .collect()
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats `value` with up to two decimals, without trailing zeros.
pub fn format_amount(value: f64) -> String {
    let rounded = round_to_hundredths(value);
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
