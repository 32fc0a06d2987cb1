use cermet_core::StrategyKind;

use super::{Strategy, StrategyContext, join_texts};
use crate::{
    formula::parse_binder,
    raw::{BinderBasis, RawPhaseResult},
    tokens::Token,
};

/// Compositions with an `x` placeholder, e.g. `WC x CoCrFeNi`.
///
/// With a leading ceramic percentage (`94.12 WC x Co`) the binder takes the
/// rest. Without one, the quantities are unknown and the result is marked as
/// needing external data, typically a measured binder volume fraction.
#[derive(Debug, Default, Clone, Copy)]
pub struct XPlaceholderStrategy;

impl Strategy for XPlaceholderStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::XPlaceholder
    }

    fn try_parse(
        &self,
        ctx: &StrategyContext<'_>,
        tokens: &[Token<'_>],
        _input: &str,
    ) -> Option<RawPhaseResult> {
        if !tokens.iter().any(Token::is_placeholder) {
            return None;
        }

        let registry = ctx.registry();
        let mut ceramic: Option<&str> = None;
        let mut ceramic_pct = None;
        let mut binder_tokens = Vec::new();
        for (index, token) in tokens.iter().enumerate() {
            if token.is_placeholder() {
                continue;
            }
            if let Some(value) = token.number() {
                let leads_ceramic = index == 0
                    && tokens
                        .get(1)
                        .is_some_and(|next| registry.is_ceramic(next.text()));
                if leads_ceramic {
                    ceramic_pct = Some(value);
                } else if ceramic.is_some() {
                    binder_tokens.push(token);
                } else {
                    return None;
                }
                continue;
            }
            if registry.is_ceramic(token.text()) {
                if ceramic.is_some() {
                    return None;
                }
                ceramic = Some(token.text());
                continue;
            }
            binder_tokens.push(token);
        }
        let ceramic = ceramic?;

        let binder_text = join_texts(binder_tokens);
        let binder = match parse_binder(&binder_text, registry) {
            Ok(binder) => binder,
            Err(issue) => return ctx.reject(self.kind(), issue, &binder_text),
        };

        let mut raw = RawPhaseResult::new(self.kind(), BinderBasis::Atomic);
        raw.ceramic.insert(ceramic.to_string(), ceramic_pct);
        raw.primary = Some(ceramic.to_string());
        raw.binder = binder;
        raw.requires_external_data = ceramic_pct.is_none();
        Some(raw)
    }
}
