//! Cermet - Structured data from free-form cermet composition strings
//!
//! This library reads composition strings such as `WC-10CoCrFeNi`,
//! `WC 85 Co 10 Ni 5` or `b WC 25 Co` and reports the ceramic hard phases,
//! the binder alloy and their weight percents. It wraps the
//! [`cermet_parser`] dispatcher with configuration, memoization and batch
//! processing.

pub mod config;

mod batch;
mod cache;
mod error;

pub use cermet_core::{
    ErrorCode, IssueKind, ParsedComposition, Registry, Severity, StrategyKind, convert, formula,
};
pub use cermet_parser::{CompositionParser, ParserConfig};

pub use batch::{BatchReport, BatchRow};
pub use cache::{CacheStats, CachedParser};
pub use error::CermetError;

use log::{debug, info};

use config::{AppConfig, ConfigError};

/// Entry point for parsing composition strings.
///
/// Results are memoized, so repeated strings in a dataset are parsed once.
///
/// # Examples
///
/// ```
/// use cermet::{Cermet, config::AppConfig};
///
/// let cermet = Cermet::new(AppConfig::default()).expect("Default config is valid");
///
/// let result = cermet.parse("WC-10CoCrFeNi");
/// assert!(result.is_success());
/// assert_eq!(result.binder_formula(), "Co1Cr1Fe1Ni1");
///
/// let report = cermet.parse_batch(["WC-10Co", "WC x Co", "###"]);
/// assert_eq!(report.succeeded(), 1);
/// assert_eq!(report.incomplete(), 1);
/// assert_eq!(report.failed(), 1);
/// ```
#[derive(Debug)]
pub struct Cermet {
    parser: CachedParser,
}

impl Default for Cermet {
    fn default() -> Self {
        Self {
            parser: CachedParser::new(
                CompositionParser::default(),
                config::DEFAULT_CACHE_CAPACITY,
            ),
        }
    }
}

impl Cermet {
    /// Create a new parser with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CermetError::Config`] if a threshold is out of range or a
    /// registry entry is invalid.
    pub fn new(config: AppConfig) -> Result<Self, CermetError> {
        config.parser.validate().map_err(ConfigError::from)?;
        let registry = config
            .registry
            .build_registry()
            .map_err(ConfigError::from)?;
        debug!(
            ceramic_phases = registry.ceramic_phases().len(),
            binder_metals = registry.binder_metals().len();
            "Registry ready"
        );

        let parser = CompositionParser::new(config.parser).with_registry(registry);
        Ok(Self {
            parser: CachedParser::new(parser, config.cache.capacity()),
        })
    }

    /// Parses one composition string.
    pub fn parse(&self, input: &str) -> ParsedComposition {
        self.parser.parse_with_volume(input, None)
    }

    /// Parses one composition string, resolving a missing binder weight
    /// percent from the binder volume percent where possible.
    pub fn parse_with_volume(&self, input: &str, binder_vol_pct: Option<f64>) -> ParsedComposition {
        self.parser.parse_with_volume(input, binder_vol_pct)
    }

    /// Parses every row, in order. A failing row never stops the batch.
    pub fn parse_batch<'a, R>(&self, rows: impl IntoIterator<Item = R>) -> BatchReport
    where
        R: Into<BatchRow<'a>>,
    {
        let mut report = BatchReport::default();
        for row in rows {
            let row = row.into();
            report.push(self.parse_with_volume(row.composition, row.binder_vol_pct));
        }

        info!(
            rows = report.len(),
            succeeded = report.succeeded(),
            incomplete = report.incomplete(),
            failed = report.failed();
            "Batch parsed"
        );
        report
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.parser.stats()
    }

    pub fn parser(&self) -> &CompositionParser {
        self.parser.parser()
    }
}
