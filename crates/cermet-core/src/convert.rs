//! Unit conversions between weight, atomic, and volume fractions.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::registry::Registry;

/// Binder density used when an element has no registered density, in g/cm³.
pub const DEFAULT_BINDER_DENSITY: f64 = 8.5;

/// Ceramic density used when a phase has no registered density, in g/cm³.
pub const DEFAULT_CERAMIC_DENSITY: f64 = 15.0;

/// Scales `amounts` so they sum to 1.
///
/// Entries that are zero, negative, or not finite are dropped. Returns an
/// empty map when nothing positive remains.
pub fn normalize_fractions(amounts: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let total: f64 = amounts
        .values()
        .filter(|value| value.is_finite() && **value > 0.0)
        .sum();
    if total <= 0.0 || !total.is_finite() {
        return BTreeMap::new();
    }

    amounts
        .iter()
        .filter(|(_, value)| value.is_finite() && **value > 0.0)
        .map(|(symbol, value)| (symbol.clone(), value / total))
        .collect()
}

/// Converts weight amounts to atomic fractions.
///
/// Uses `a_i = (w_i / M_i) / Σ_j (w_j / M_j)`. If any element has no
/// molar mass, the weights are normalized and returned as they are.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use cermet_core::{Registry, convert::weight_to_atomic};
///
/// let registry = Registry::default();
/// let weights = BTreeMap::from([("Co".to_string(), 50.0), ("Ni".to_string(), 50.0)]);
/// let atomic = weight_to_atomic(&weights, &registry);
///
/// assert!(atomic["Ni"] > atomic["Co"]);
/// ```
pub fn weight_to_atomic(
    weights: &BTreeMap<String, f64>,
    registry: &Registry,
) -> BTreeMap<String, f64> {
    let weights = normalize_fractions(weights);

    let mut moles = BTreeMap::new();
    for (symbol, weight) in &weights {
        let Some(mass) = registry.molar_mass(symbol) else {
            warn!(element = symbol.as_str(); "Missing molar mass, keeping weight fractions");
            return weights;
        };
        moles.insert(symbol.clone(), weight / mass);
    }

    normalize_fractions(&moles)
}

/// Converts atomic amounts to weight fractions summing to 1.
///
/// This is the inverse of [`weight_to_atomic`]. If any element has no
/// molar mass, the amounts are normalized and returned as they are.
pub fn atomic_to_weight(
    atomic: &BTreeMap<String, f64>,
    registry: &Registry,
) -> BTreeMap<String, f64> {
    let atomic = normalize_fractions(atomic);

    let mut masses = BTreeMap::new();
    for (symbol, fraction) in &atomic {
        let Some(mass) = registry.molar_mass(symbol) else {
            warn!(element = symbol.as_str(); "Missing molar mass, keeping atomic fractions");
            return atomic;
        };
        masses.insert(symbol.clone(), fraction * mass);
    }

    normalize_fractions(&masses)
}

/// Estimates the density of a binder from its atomic fractions.
///
/// The result is the fraction-weighted mean of the element densities. Falls
/// back to `default` when any element has no registered density.
pub fn binder_density(atomic: &BTreeMap<String, f64>, registry: &Registry, default: f64) -> f64 {
    let fractions = normalize_fractions(atomic);
    if fractions.is_empty() {
        return default;
    }

    let mut density = 0.0;
    for (symbol, fraction) in &fractions {
        let Some(element_density) = registry.density(symbol) else {
            debug!(element = symbol.as_str(); "No density registered, using default binder density");
            return default;
        };
        density += fraction * element_density;
    }
    density
}

/// Converts a binder volume percent to a binder weight percent.
///
/// Computes `w = 100 v ρ_b / ((1 - v) ρ_c + v ρ_b)` where `v` is the
/// volume fraction. Returns `None` unless `volume_pct` lies strictly between
/// 0 and 100 and both densities are positive.
///
/// # Example
///
/// ```
/// use cermet_core::convert::volume_to_weight_pct;
///
/// // Equal densities leave the percentage unchanged.
/// let weight = volume_to_weight_pct(20.0, 10.0, 10.0).unwrap();
/// assert!((weight - 20.0).abs() < 1e-9);
/// assert!(volume_to_weight_pct(0.0, 8.9, 15.63).is_none());
/// ```
pub fn volume_to_weight_pct(
    volume_pct: f64,
    binder_density: f64,
    ceramic_density: f64,
) -> Option<f64> {
    if !(volume_pct > 0.0 && volume_pct < 100.0) {
        return None;
    }
    if !(binder_density > 0.0 && ceramic_density > 0.0) {
        return None;
    }

    let v = volume_pct / 100.0;
    let binder_mass = v * binder_density;
    let ceramic_mass = (1.0 - v) * ceramic_density;
    let weight_pct = 100.0 * binder_mass / (ceramic_mass + binder_mass);
    weight_pct.is_finite().then_some(weight_pct)
}
