//! Immutable reference tables for composition parsing.
//!
//! A [`Registry`] bundles the set of recognized ceramic (hard-phase)
//! formulas, the set of recognized binder metal symbols, per-element molar
//! masses, and per-phase densities. The built-in tables are created once per
//! process and shared through [`Registry::shared`]; custom tables are built
//! with [`RegistryBuilder`] and injected into the parser at construction
//! time.
//!
//! # Example
//!
//! ```
//! use cermet_core::Registry;
//!
//! let registry = Registry::builder()
//!     .with_ceramic_phase("Ti(C,N)")
//!     .with_molar_mass("Sc", 44.956)
//!     .build()
//!     .unwrap();
//!
//! assert!(registry.is_ceramic("WC"));
//! assert!(registry.is_ceramic("Ti(C,N)"));
//! assert!(registry.is_binder_metal("Co"));
//! assert!(!registry.is_binder_metal("WC"));
//! ```

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    sync::{Arc, OnceLock},
};

use thiserror::Error;

/// Hard-phase formulas recognized out of the box.
const CERAMIC_PHASES: &[&str] = &[
    "WC", "W2C", "TiC", "TiN", "TiCN", "TaC", "NbC", "VC", "Cr3C2", "Mo2C", "MoC", "ZrC", "HfC",
    "SiC", "B4C", "TiB2", "Al2O3", "ZrO2", "TiO2",
];

/// Metallic binder elements recognized out of the box.
const BINDER_METALS: &[&str] = &[
    "Co", "Ni", "Fe", "Cr", "Mn", "Cu", "Al", "Ti", "V", "Mo", "W", "Nb", "Ta", "Zr", "Hf", "Re",
    "Ru", "Rh", "Pd", "Ir", "Pt", "Au", "Ag", "Mg", "Zn", "Si",
];

/// Standard atomic weights in g/mol.
const MOLAR_MASSES: &[(&str, f64)] = &[
    ("B", 10.81),
    ("C", 12.011),
    ("N", 14.007),
    ("O", 15.999),
    ("Mg", 24.305),
    ("Al", 26.982),
    ("Si", 28.085),
    ("Ti", 47.867),
    ("V", 50.942),
    ("Cr", 51.996),
    ("Mn", 54.938),
    ("Fe", 55.845),
    ("Co", 58.933),
    ("Ni", 58.693),
    ("Cu", 63.546),
    ("Zn", 65.38),
    ("Zr", 91.224),
    ("Nb", 92.906),
    ("Mo", 95.96),
    ("Ru", 101.07),
    ("Rh", 102.91),
    ("Pd", 106.42),
    ("Ag", 107.87),
    ("Hf", 178.49),
    ("Ta", 180.95),
    ("W", 183.84),
    ("Re", 186.21),
    ("Ir", 192.22),
    ("Pt", 195.08),
    ("Au", 196.97),
];

/// Room-temperature densities in g/cm³ for hard phases and binder metals.
const DENSITIES: &[(&str, f64)] = &[
    ("WC", 15.63),
    ("W2C", 17.15),
    ("TiC", 4.93),
    ("TiN", 5.22),
    ("TiCN", 5.2),
    ("TaC", 14.3),
    ("NbC", 7.6),
    ("VC", 5.77),
    ("Cr3C2", 6.68),
    ("Mo2C", 9.18),
    ("ZrC", 6.73),
    ("HfC", 12.2),
    ("SiC", 3.21),
    ("B4C", 2.52),
    ("TiB2", 4.52),
    ("Al2O3", 3.95),
    ("ZrO2", 5.68),
    ("TiO2", 4.23),
    ("Co", 8.9),
    ("Ni", 8.9),
    ("Fe", 7.87),
    ("Cr", 7.19),
    ("Mn", 7.21),
    ("Cu", 8.96),
    ("Al", 2.70),
    ("Ti", 4.51),
    ("V", 6.0),
    ("Mo", 10.28),
    ("W", 19.25),
    ("Nb", 8.57),
    ("Ta", 16.69),
    ("Zr", 6.52),
    ("Hf", 13.31),
];

static SHARED: OnceLock<Arc<Registry>> = OnceLock::new();

/// Errors raised while assembling a custom [`Registry`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// A molar mass was zero, negative, or not a number.
    #[error("invalid molar mass for '{symbol}': {value}")]
    InvalidMolarMass { symbol: String, value: f64 },

    /// A density was zero, negative, or not a number.
    #[error("invalid density for '{symbol}': {value}")]
    InvalidDensity { symbol: String, value: f64 },

    /// A symbol was empty or contained whitespace.
    #[error("invalid symbol '{0}': symbols must be non-empty and contain no whitespace")]
    InvalidSymbol(String),
}

/// Immutable reference tables used to classify tokens and convert units.
///
/// Lookups are case-sensitive: `"Co"` is cobalt, `"CO"` is not recognized.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    ceramic_phases: HashSet<String>,
    binder_metals: HashSet<String>,
    molar_masses: HashMap<String, f64>,
    densities: HashMap<String, f64>,
}

impl Registry {
    /// Returns the process-wide built-in registry.
    ///
    /// The tables are built on first access and never mutated afterwards,
    /// so the returned handle is safe to share between threads.
    pub fn shared() -> Arc<Registry> {
        SHARED.get_or_init(|| Arc::new(Self::builtin())).clone()
    }

    /// Starts a [`RegistryBuilder`] seeded with the built-in tables.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::from_registry(Self::builtin())
    }

    /// Starts a [`RegistryBuilder`] with no entries at all.
    pub fn empty_builder() -> RegistryBuilder {
        RegistryBuilder::from_registry(Self {
            ceramic_phases: HashSet::new(),
            binder_metals: HashSet::new(),
            molar_masses: HashMap::new(),
            densities: HashMap::new(),
        })
    }

    fn builtin() -> Self {
        Self {
            ceramic_phases: CERAMIC_PHASES.iter().map(|s| s.to_string()).collect(),
            binder_metals: BINDER_METALS.iter().map(|s| s.to_string()).collect(),
            molar_masses: MOLAR_MASSES
                .iter()
                .map(|(symbol, mass)| (symbol.to_string(), *mass))
                .collect(),
            densities: DENSITIES
                .iter()
                .map(|(symbol, density)| (symbol.to_string(), *density))
                .collect(),
        }
    }

    /// Returns `true` if `formula` is a registered ceramic hard phase.
    pub fn is_ceramic(&self, formula: &str) -> bool {
        self.ceramic_phases.contains(formula)
    }

    /// Returns `true` if `symbol` is a registered binder metal.
    pub fn is_binder_metal(&self, symbol: &str) -> bool {
        self.binder_metals.contains(symbol)
    }

    /// Returns the molar mass of `symbol` in g/mol, if known.
    pub fn molar_mass(&self, symbol: &str) -> Option<f64> {
        self.molar_masses.get(symbol).copied()
    }

    /// Returns the density of a phase or element in g/cm³, if known.
    pub fn density(&self, symbol: &str) -> Option<f64> {
        self.densities.get(symbol).copied()
    }

    /// Returns the registered ceramic phases in sorted order.
    pub fn ceramic_phases(&self) -> BTreeSet<&str> {
        self.ceramic_phases.iter().map(String::as_str).collect()
    }

    /// Returns the registered binder metals in sorted order.
    pub fn binder_metals(&self) -> BTreeSet<&str> {
        self.binder_metals.iter().map(String::as_str).collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builder for custom [`Registry`] tables.
///
/// Entries are validated when [`build`](RegistryBuilder::build) is called.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    fn from_registry(registry: Registry) -> Self {
        Self { registry }
    }

    /// Registers an additional ceramic hard-phase formula.
    pub fn with_ceramic_phase(mut self, formula: impl Into<String>) -> Self {
        self.registry.ceramic_phases.insert(formula.into());
        self
    }

    /// Registers an additional binder metal symbol.
    pub fn with_binder_metal(mut self, symbol: impl Into<String>) -> Self {
        self.registry.binder_metals.insert(symbol.into());
        self
    }

    /// Sets or replaces the molar mass of an element, in g/mol.
    pub fn with_molar_mass(mut self, symbol: impl Into<String>, mass: f64) -> Self {
        self.registry.molar_masses.insert(symbol.into(), mass);
        self
    }

    /// Sets or replaces the density of a phase or element, in g/cm³.
    pub fn with_density(mut self, symbol: impl Into<String>, density: f64) -> Self {
        self.registry.densities.insert(symbol.into(), density);
        self
    }

    /// Validates the tables and returns the finished [`Registry`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if a symbol is blank or contains whitespace,
    /// or if a molar mass or density is not a positive finite number.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let registry = self.registry;

        let symbols = registry
            .ceramic_phases
            .iter()
            .chain(registry.binder_metals.iter())
            .chain(registry.molar_masses.keys())
            .chain(registry.densities.keys());
        for symbol in symbols {
            if symbol.is_empty() || symbol.chars().any(char::is_whitespace) {
                return Err(RegistryError::InvalidSymbol(symbol.clone()));
            }
        }

        for (symbol, &value) in &registry.molar_masses {
            if !(value.is_finite() && value > 0.0) {
                return Err(RegistryError::InvalidMolarMass {
                    symbol: symbol.clone(),
                    value,
                });
            }
        }

        for (symbol, &value) in &registry.densities {
            if !(value.is_finite() && value > 0.0) {
                return Err(RegistryError::InvalidDensity {
                    symbol: symbol.clone(),
                    value,
                });
            }
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_builtin_tables() {
        let registry = Registry::default();

        assert!(registry.is_ceramic("WC"));
        assert!(registry.is_ceramic("Cr3C2"));
        assert!(registry.is_binder_metal("Co"));
        assert!(registry.is_binder_metal("W"));
        assert!(!registry.is_ceramic("Co"));
        assert!(!registry.is_binder_metal("WC"));
        assert_approx_eq!(f64, registry.molar_mass("Co").unwrap(), 58.933);
        assert_approx_eq!(f64, registry.density("WC").unwrap(), 15.63);
    }

    #[test]
    fn test_lookups_are_case_sensitive() {
        let registry = Registry::default();

        assert!(!registry.is_ceramic("wc"));
        assert!(!registry.is_binder_metal("CO"));
        assert!(registry.molar_mass("co").is_none());
    }

    #[test]
    fn test_every_binder_metal_has_molar_mass() {
        let registry = Registry::default();

        for metal in registry.binder_metals() {
            assert!(
                registry.molar_mass(metal).is_some(),
                "missing molar mass for {metal}"
            );
        }
    }

    #[test]
    fn test_shared_registry_is_reused() {
        let first = Registry::shared();
        let second = Registry::shared();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_builder_adds_entries() {
        let registry = Registry::builder()
            .with_ceramic_phase("Ti(C,N)")
            .with_binder_metal("Sc")
            .with_molar_mass("Sc", 44.956)
            .build()
            .unwrap();

        assert!(registry.is_ceramic("Ti(C,N)"));
        assert!(registry.is_binder_metal("Sc"));
        assert!(registry.is_ceramic("WC"));
    }

    #[test]
    fn test_empty_builder_starts_blank() {
        let registry = Registry::empty_builder()
            .with_ceramic_phase("WC")
            .build()
            .unwrap();

        assert!(registry.is_ceramic("WC"));
        assert!(!registry.is_ceramic("TiC"));
        assert!(registry.binder_metals().is_empty());
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        let err = Registry::builder()
            .with_molar_mass("Co", -1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidMolarMass { .. }));

        let err = Registry::builder()
            .with_density("WC", f64::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidDensity { .. }));

        let err = Registry::builder()
            .with_ceramic_phase("W C")
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::InvalidSymbol("W C".to_string()));
    }
}
