//! Application configuration loaded from TOML.
//!
//! ```toml
//! [parser]
//! minor_additive_threshold = 5.0
//! implicit_quantity = "missing_data"
//!
//! [registry]
//! ceramic_phases = ["TiAlN"]
//! molar_masses = { Sc = 44.956 }
//!
//! [cache]
//! capacity = 5000
//! ```

use std::{collections::BTreeMap, sync::Arc};

use serde::Deserialize;
use thiserror::Error;

use cermet_core::{Registry, RegistryError};
use cermet_parser::{ParserConfig, ParserConfigError};

/// Number of parse results kept by the memoizing cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// A configuration that deserialized but holds invalid values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Parser(#[from] ParserConfigError),

    #[error("invalid registry entry: {0}")]
    Registry(#[from] RegistryError),
}

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser thresholds and policies
    #[serde(default)]
    pub parser: ParserConfig,

    /// Additions to the built-in reference tables
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Result cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for out-of-range thresholds or invalid
    /// registry entries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parser.validate()?;
        self.registry.build_registry()?;
        Ok(())
    }
}

/// Extra ceramic phases, binder metals, and physical constants.
///
/// Entries are added on top of the built-in tables; a molar mass or density
/// given here replaces the built-in value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    ceramic_phases: Vec<String>,
    binder_metals: Vec<String>,
    molar_masses: BTreeMap<String, f64>,
    densities: BTreeMap<String, f64>,
}

impl RegistryConfig {
    pub fn with_ceramic_phase(mut self, formula: impl Into<String>) -> Self {
        self.ceramic_phases.push(formula.into());
        self
    }

    pub fn with_binder_metal(mut self, symbol: impl Into<String>) -> Self {
        self.binder_metals.push(symbol.into());
        self
    }

    pub fn with_molar_mass(mut self, symbol: impl Into<String>, mass: f64) -> Self {
        self.molar_masses.insert(symbol.into(), mass);
        self
    }

    pub fn with_density(mut self, symbol: impl Into<String>, density: f64) -> Self {
        self.densities.insert(symbol.into(), density);
        self
    }

    /// Returns `true` if nothing is added to the built-in tables.
    pub fn is_empty(&self) -> bool {
        self.ceramic_phases.is_empty()
            && self.binder_metals.is_empty()
            && self.molar_masses.is_empty()
            && self.densities.is_empty()
    }

    /// Builds the registry, sharing the built-in one when nothing is added.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] for blank symbols or non-positive values.
    pub fn build_registry(&self) -> Result<Arc<Registry>, RegistryError> {
        if self.is_empty() {
            return Ok(Registry::shared());
        }

        let mut builder = Registry::builder();
        for formula in &self.ceramic_phases {
            builder = builder.with_ceramic_phase(formula.as_str());
        }
        for symbol in &self.binder_metals {
            builder = builder.with_binder_metal(symbol.as_str());
        }
        for (symbol, mass) in &self.molar_masses {
            builder = builder.with_molar_mass(symbol.as_str(), *mass);
        }
        for (symbol, density) in &self.densities {
            builder = builder.with_density(symbol.as_str(), *density);
        }
        builder.build().map(Arc::new)
    }
}

/// Result cache settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl CacheConfig {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Maximum number of cached results; 0 disables caching.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use cermet_parser::ImplicitQuantityPolicy;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.parser, ParserConfig::default());
        assert!(config.registry.is_empty());
        assert_eq!(config.cache.capacity(), DEFAULT_CACHE_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [parser]
            implicit_quantity = "missing_data"

            [registry]
            ceramic_phases = ["TiAlN"]
            binder_metals = ["Sc"]
            molar_masses = { Sc = 44.956 }
            densities = { TiAlN = 4.8 }

            [cache]
            capacity = 16
            "#,
        )
        .unwrap();

        assert_eq!(
            config.parser.implicit_quantity(),
            ImplicitQuantityPolicy::MissingData
        );
        assert_eq!(config.cache.capacity(), 16);

        let registry = config.registry.build_registry().unwrap();
        assert!(registry.is_ceramic("TiAlN"));
        assert!(registry.is_ceramic("WC"));
        assert!(registry.is_binder_metal("Sc"));
        assert_eq!(registry.density("TiAlN"), Some(4.8));
    }

    #[test]
    fn test_unknown_registry_key_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[registry]\nphases = [\"TiAlN\"]\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_registry_values() {
        let config = AppConfig {
            registry: RegistryConfig::default().with_molar_mass("Sc", -1.0),
            ..AppConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Registry(RegistryError::InvalidMolarMass { .. }))
        ));
    }

    #[test]
    fn test_default_registry_is_shared() {
        let registry = RegistryConfig::default().build_registry().unwrap();

        assert!(Arc::ptr_eq(&registry, &Registry::shared()));
    }
}
