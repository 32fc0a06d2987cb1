//! # Cermet Parser
//!
//! Turns free-form cermet composition strings, as found in lab records and
//! literature tables, into a structured [`ParsedComposition`]: the ceramic
//! phases with their weight percents, the binder elements as atomic
//! fractions, and the binder weight percent.
//!
//! Composition strings come in many notations. Each notation is recognized
//! by a [`Strategy`]; the [`CompositionParser`] tries them in order and the
//! first one that matches wins. Missing quantities are then inferred from
//! the fact that the percentages add up to 100.
//!
//! ## Usage
//!
//! ```
//! use cermet_parser::{CompositionParser, ParserConfig};
//!
//! let parser = CompositionParser::new(ParserConfig::default());
//!
//! let result = parser.parse("WC 85 Co 10 Ni 5");
//! assert!(result.is_success());
//! assert_eq!(result.ceramic_formula(), Some("WC"));
//! assert_eq!(result.binder_wt_pct(), Some(15.0));
//! assert_eq!(result.binder_formula(), "Co2Ni1");
//!
//! let result = parser.parse("not a composition");
//! assert!(!result.is_success());
//! ```

mod config;
mod dispatch;
mod formula;
mod infer;
mod normalize;
mod raw;
mod strategy;
mod tokenizer;
mod tokens;

pub use cermet_core::{IssueKind, ParsedComposition, Registry, StrategyKind};

pub use config::{ImplicitQuantityPolicy, ParserConfig, ParserConfigError};
pub use dispatch::{CompositionParser, parse};
pub use formula::{parse_alloy, parse_binder, parse_formula, split_leading_quantity};
pub use infer::infer;
pub use normalize::normalize;
pub use raw::{BinderBasis, RawPhaseResult};
pub use strategy::{
    BPrefixStrategy, DashStrategy, MixedPhaseStrategy, NumberFirstStrategy, PureAlloyStrategy,
    SpaceStrategy, Strategy, StrategyContext, XPlaceholderStrategy, default_strategies,
};
pub use tokenizer::{parse_number, tokenize, tokens};
pub use tokens::Token;
