//! Token classification into hard phase and binder.

use std::fmt;

use serde::Serialize;

use crate::registry::Registry;

/// The two phases of a cermet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Ceramic hard phase (carbide, nitride, oxide, boride).
    Ceramic,
    /// Metallic binder phase.
    Binder,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Ceramic => write!(f, "ceramic"),
            Phase::Binder => write!(f, "binder"),
        }
    }
}

/// Result of classifying a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Ceramic,
    Binder,
    Unknown,
}

impl Classification {
    /// Returns the [`Phase`] for recognized tokens, `None` for unknown ones.
    pub fn phase(self) -> Option<Phase> {
        match self {
            Classification::Ceramic => Some(Phase::Ceramic),
            Classification::Binder => Some(Phase::Binder),
            Classification::Unknown => None,
        }
    }
}

/// Classifies chemical tokens against a [`Registry`].
///
/// Ceramic formulas are checked first so that `"WC"` is a hard phase while
/// `"W"` is a binder metal.
///
/// # Example
///
/// ```
/// use cermet_core::{Classification, ElementClassifier, Registry};
///
/// let registry = Registry::default();
/// let classifier = ElementClassifier::new(&registry);
///
/// assert_eq!(classifier.classify("WC"), Classification::Ceramic);
/// assert_eq!(classifier.classify("Co"), Classification::Binder);
/// assert_eq!(classifier.classify("x"), Classification::Unknown);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ElementClassifier<'r> {
    registry: &'r Registry,
}

impl<'r> ElementClassifier<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Classifies `text` as ceramic, binder, or unknown.
    pub fn classify(&self, text: &str) -> Classification {
        if self.registry.is_ceramic(text) {
            Classification::Ceramic
        } else if self.registry.is_binder_metal(text) {
            Classification::Binder
        } else {
            Classification::Unknown
        }
    }

    /// Returns `true` if `text` is a registered ceramic phase.
    pub fn is_ceramic(&self, text: &str) -> bool {
        self.classify(text) == Classification::Ceramic
    }

    /// Returns `true` if `text` is a registered binder metal.
    pub fn is_binder(&self, text: &str) -> bool {
        self.classify(text) == Classification::Binder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_registered_tokens() {
        let registry = Registry::default();
        let classifier = ElementClassifier::new(&registry);

        assert_eq!(classifier.classify("TiC"), Classification::Ceramic);
        assert_eq!(classifier.classify("Ni"), Classification::Binder);
        assert_eq!(classifier.classify("W"), Classification::Binder);
        assert_eq!(classifier.classify("WC"), Classification::Ceramic);
    }

    #[test]
    fn test_classify_unknown_tokens() {
        let registry = Registry::default();
        let classifier = ElementClassifier::new(&registry);

        assert_eq!(classifier.classify(""), Classification::Unknown);
        assert_eq!(classifier.classify("10"), Classification::Unknown);
        assert_eq!(classifier.classify("co"), Classification::Unknown);
        assert_eq!(classifier.classify("CoCrFeNi"), Classification::Unknown);
    }

    #[test]
    fn test_phase_mapping() {
        assert_eq!(Classification::Ceramic.phase(), Some(Phase::Ceramic));
        assert_eq!(Classification::Binder.phase(), Some(Phase::Binder));
        assert_eq!(Classification::Unknown.phase(), None);
        assert_eq!(Phase::Binder.to_string(), "binder");
    }

    #[test]
    fn test_custom_registry_changes_classification() {
        let registry = Registry::empty_builder()
            .with_ceramic_phase("Co")
            .build()
            .unwrap();
        let classifier = ElementClassifier::new(&registry);

        assert!(classifier.is_ceramic("Co"));
        assert!(!classifier.is_binder("Co"));
        assert!(!classifier.is_ceramic("WC"));
    }
}
