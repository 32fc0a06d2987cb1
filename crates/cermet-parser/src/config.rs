//! Tunable thresholds for the parsing heuristics.
//!
//! [`ParserConfig`] implements [`serde::Deserialize`], so it can be loaded as
//! the `[parser]` section of a TOML configuration file. Every field has a
//! default and can be omitted.
//!
//! # Example
//!
//! ```
//! # use cermet_parser::{ImplicitQuantityPolicy, ParserConfig};
//! let config = ParserConfig::default().with_implicit_quantity(ImplicitQuantityPolicy::MissingData);
//!
//! assert_eq!(config.hea_min_elements(), 4);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;
use thiserror::Error;

use cermet_core::convert::{DEFAULT_BINDER_DENSITY, DEFAULT_CERAMIC_DENSITY};

/// Ceramic additives below this total (wt%) are treated as minor phases.
pub const MINOR_ADDITIVE_THRESHOLD: f64 = 5.0;

/// Lower bound (exclusive) of an explicit total that leaves a remainder for
/// unquantified ceramics.
pub const REMAINDER_MIN_TOTAL: f64 = 10.0;

/// Tolerance when checking that percentages add up to 100.
pub const SUM_TOLERANCE: f64 = 0.01;

/// Binder element count from which a binder is a high-entropy alloy.
pub const HEA_MIN_ELEMENTS: usize = 4;

/// Minimum fraction of binder-metal atoms in a pure alloy string.
pub const PURE_ALLOY_MIN_BINDER_FRACTION: f64 = 0.9;

/// How a ceramic written without a quantity is interpreted.
///
/// Lab records disagree on whether `WC 2 TaC 10 Co` means "WC makes up the
/// rest" or "the WC amount was not recorded".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicitQuantityPolicy {
    /// The unquantified ceramic is the primary phase and takes the remainder.
    #[default]
    PrimaryRemainder,
    /// The quantity is missing; the result needs external data.
    MissingData,
}

/// A threshold with a value outside its valid range.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid parser setting `{field}`: {reason}")]
pub struct ParserConfigError {
    field: &'static str,
    reason: String,
}

impl ParserConfigError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending setting.
    pub fn field(&self) -> &'static str {
        self.field
    }
}

/// Thresholds and policies used by the parsing strategies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    minor_additive_threshold: f64,
    remainder_min_total: f64,
    sum_tolerance: f64,
    hea_min_elements: usize,
    pure_alloy_min_binder_fraction: f64,
    implicit_quantity: ImplicitQuantityPolicy,
    default_binder_density: f64,
    default_ceramic_density: f64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            minor_additive_threshold: MINOR_ADDITIVE_THRESHOLD,
            remainder_min_total: REMAINDER_MIN_TOTAL,
            sum_tolerance: SUM_TOLERANCE,
            hea_min_elements: HEA_MIN_ELEMENTS,
            pure_alloy_min_binder_fraction: PURE_ALLOY_MIN_BINDER_FRACTION,
            implicit_quantity: ImplicitQuantityPolicy::default(),
            default_binder_density: DEFAULT_BINDER_DENSITY,
            default_ceramic_density: DEFAULT_CERAMIC_DENSITY,
        }
    }
}

impl ParserConfig {
    pub fn minor_additive_threshold(&self) -> f64 {
        self.minor_additive_threshold
    }

    pub fn remainder_min_total(&self) -> f64 {
        self.remainder_min_total
    }

    pub fn sum_tolerance(&self) -> f64 {
        self.sum_tolerance
    }

    pub fn hea_min_elements(&self) -> usize {
        self.hea_min_elements
    }

    pub fn pure_alloy_min_binder_fraction(&self) -> f64 {
        self.pure_alloy_min_binder_fraction
    }

    pub fn implicit_quantity(&self) -> ImplicitQuantityPolicy {
        self.implicit_quantity
    }

    /// Binder density used when an element has no registered density.
    pub fn default_binder_density(&self) -> f64 {
        self.default_binder_density
    }

    /// Ceramic density used when a phase has no registered density.
    pub fn default_ceramic_density(&self) -> f64 {
        self.default_ceramic_density
    }

    pub fn with_minor_additive_threshold(mut self, value: f64) -> Self {
        self.minor_additive_threshold = value;
        self
    }

    pub fn with_remainder_min_total(mut self, value: f64) -> Self {
        self.remainder_min_total = value;
        self
    }

    pub fn with_sum_tolerance(mut self, value: f64) -> Self {
        self.sum_tolerance = value;
        self
    }

    pub fn with_hea_min_elements(mut self, value: usize) -> Self {
        self.hea_min_elements = value;
        self
    }

    pub fn with_pure_alloy_min_binder_fraction(mut self, value: f64) -> Self {
        self.pure_alloy_min_binder_fraction = value;
        self
    }

    pub fn with_implicit_quantity(mut self, policy: ImplicitQuantityPolicy) -> Self {
        self.implicit_quantity = policy;
        self
    }

    pub fn with_default_densities(mut self, binder: f64, ceramic: f64) -> Self {
        self.default_binder_density = binder;
        self.default_ceramic_density = ceramic;
        self
    }

    /// Checks that every threshold lies in its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`ParserConfigError`] naming the first invalid setting.
    pub fn validate(&self) -> Result<(), ParserConfigError> {
        let percent = |field: &'static str, value: f64| {
            if (0.0..=100.0).contains(&value) {
                Ok(())
            } else {
                Err(ParserConfigError::new(
                    field,
                    format!("{value} is not between 0 and 100"),
                ))
            }
        };
        percent("minor_additive_threshold", self.minor_additive_threshold)?;
        percent("remainder_min_total", self.remainder_min_total)?;

        if !(self.sum_tolerance.is_finite() && self.sum_tolerance > 0.0) {
            return Err(ParserConfigError::new(
                "sum_tolerance",
                format!("{} must be a positive number", self.sum_tolerance),
            ));
        }
        if self.hea_min_elements == 0 {
            return Err(ParserConfigError::new(
                "hea_min_elements",
                "must be at least 1",
            ));
        }
        if !(self.pure_alloy_min_binder_fraction > 0.0
            && self.pure_alloy_min_binder_fraction <= 1.0)
        {
            return Err(ParserConfigError::new(
                "pure_alloy_min_binder_fraction",
                format!(
                    "{} is not in (0, 1]",
                    self.pure_alloy_min_binder_fraction
                ),
            ));
        }
        for (field, density) in [
            ("default_binder_density", self.default_binder_density),
            ("default_ceramic_density", self.default_ceramic_density),
        ] {
            if !(density.is_finite() && density > 0.0) {
                return Err(ParserConfigError::new(
                    field,
                    format!("{density} must be a positive density"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();

        assert_approx_eq!(f64, config.minor_additive_threshold(), 5.0);
        assert_approx_eq!(f64, config.remainder_min_total(), 10.0);
        assert_approx_eq!(f64, config.sum_tolerance(), 0.01);
        assert_eq!(config.hea_min_elements(), 4);
        assert_eq!(
            config.implicit_quantity(),
            ImplicitQuantityPolicy::PrimaryRemainder
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: ParserConfig = toml::from_str(
            r#"
            minor_additive_threshold = 3.0
            implicit_quantity = "missing_data"
            "#,
        )
        .unwrap();

        assert_approx_eq!(f64, config.minor_additive_threshold(), 3.0);
        assert_approx_eq!(f64, config.remainder_min_total(), 10.0);
        assert_eq!(
            config.implicit_quantity(),
            ImplicitQuantityPolicy::MissingData
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: Result<ParserConfig, _> = toml::from_str("threshold = 1.0");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let err = ParserConfig::default()
            .with_sum_tolerance(0.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "sum_tolerance");

        let err = ParserConfig::default()
            .with_minor_additive_threshold(120.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "minor_additive_threshold");

        let err = ParserConfig::default()
            .with_pure_alloy_min_binder_fraction(1.5)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "pure_alloy_min_binder_fraction");

        let err = ParserConfig::default()
            .with_default_densities(-1.0, 15.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "default_binder_density");
    }
}
