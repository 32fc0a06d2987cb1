//! Pluggable recognizers for composition notations.
//!
//! Each [`Strategy`] checks whether the input has the shape of one notation
//! and, if so, extracts a [`RawPhaseResult`]. Strategies return `None` when
//! the shape does not match; they never fail loudly.
//!
//! The built-in strategies, in dispatch order:
//!
//! | Strategy | Example |
//! |----------|---------|
//! | [`DashStrategy`] | `WC-10CoCrFeNi` |
//! | [`SpaceStrategy`] | `WC 85 Co 10 Ni 5` |
//! | [`BPrefixStrategy`] | `b WC 25 Co` |
//! | [`XPlaceholderStrategy`] | `WC x CoCrFeNi` |
//! | [`NumberFirstStrategy`] | `90 WC 10 Co` |
//! | [`MixedPhaseStrategy`] | `WC 10 VC 9.6 Co 0.4 Ru` |
//! | [`PureAlloyStrategy`] | `Cr20 Fe20 Mn20 Ni40` |

mod b_prefix;
mod dash;
mod mixed_phase;
mod number_first;
mod pure_alloy;
mod space;
mod x_placeholder;

use std::{cell::Cell, fmt};

use log::debug;

use cermet_core::{ElementClassifier, IssueKind, Registry, StrategyKind};

use crate::{config::ParserConfig, raw::RawPhaseResult, tokens::Token};

pub use b_prefix::BPrefixStrategy;
pub use dash::DashStrategy;
pub use mixed_phase::MixedPhaseStrategy;
pub use number_first::NumberFirstStrategy;
pub use pure_alloy::PureAlloyStrategy;
pub use space::SpaceStrategy;
pub use x_placeholder::XPlaceholderStrategy;

/// Shared, read-only inputs for one parse attempt.
///
/// A context also remembers the first reason a strategy gave for rejecting
/// input whose shape it recognized, so the final failure can report it.
#[derive(Debug)]
pub struct StrategyContext<'a> {
    registry: &'a Registry,
    config: &'a ParserConfig,
    rejection: Cell<Option<IssueKind>>,
}

impl<'a> StrategyContext<'a> {
    pub fn new(registry: &'a Registry, config: &'a ParserConfig) -> Self {
        Self {
            registry,
            config,
            rejection: Cell::new(None),
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn config(&self) -> &'a ParserConfig {
        self.config
    }

    pub fn classifier(&self) -> ElementClassifier<'a> {
        ElementClassifier::new(self.registry)
    }

    /// Records why `strategy` rejected the input and returns `None`.
    pub fn reject<T>(&self, strategy: StrategyKind, issue: IssueKind, detail: &str) -> Option<T> {
        debug!(strategy = strategy.name(), issue:?, detail; "Strategy rejected input");
        if self.rejection.get().is_none() {
            self.rejection.set(Some(issue));
        }
        None
    }

    /// The first recorded rejection reason, if any.
    pub fn rejection(&self) -> Option<IssueKind> {
        self.rejection.get()
    }
}

/// A recognizer for one composition notation.
///
/// Implementations must be cheap to call repeatedly and must not panic on
/// any input.
pub trait Strategy: Send + Sync + fmt::Debug {
    /// Identifies the strategy in results and logs.
    fn kind(&self) -> StrategyKind;

    /// Tries to read `input` (already normalized) and its `tokens`.
    ///
    /// Returns `None` if the input does not have this strategy's shape.
    fn try_parse(
        &self,
        ctx: &StrategyContext<'_>,
        tokens: &[Token<'_>],
        input: &str,
    ) -> Option<RawPhaseResult>;
}

/// The built-in strategies in dispatch order.
pub fn default_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(DashStrategy),
        Box::new(SpaceStrategy),
        Box::new(BPrefixStrategy),
        Box::new(XPlaceholderStrategy),
        Box::new(NumberFirstStrategy),
        Box::new(MixedPhaseStrategy),
        Box::new(PureAlloyStrategy),
    ]
}

/// Returns the formula with the largest value; ties go to the first one.
fn largest<'a>(values: impl IntoIterator<Item = (&'a str, f64)>) -> Option<String> {
    let mut best: Option<(&str, f64)> = None;
    for (formula, value) in values {
        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((formula, value));
        }
    }
    best.map(|(formula, _)| formula.to_string())
}

/// Joins token texts with single spaces.
fn join_texts<'t, 'src: 't>(tokens: impl IntoIterator<Item = &'t Token<'src>>) -> String {
    tokens
        .into_iter()
        .map(Token::text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs one strategy on `input` with the built-in registry.
#[cfg(test)]
fn run_strategy(strategy: &dyn Strategy, input: &str) -> Option<RawPhaseResult> {
    run_strategy_with(strategy, input, &ParserConfig::default())
}

#[cfg(test)]
fn run_strategy_with(
    strategy: &dyn Strategy,
    input: &str,
    config: &ParserConfig,
) -> Option<RawPhaseResult> {
    let registry = Registry::default();
    let ctx = StrategyContext::new(&registry, config);
    let normalized = crate::normalize::normalize(input);
    let tokens = crate::tokenizer::tokenize(&normalized);
    strategy.try_parse(&ctx, &tokens, &normalized)
}
