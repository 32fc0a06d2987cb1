use cermet_core::{IssueKind, StrategyKind};

use super::{Strategy, StrategyContext, join_texts};
use crate::{
    formula::parse_binder,
    raw::{BinderBasis, RawPhaseResult},
    tokens::Token,
};

/// `b <ceramic> <binder_pct> <binder composition>`, e.g. `b WC 25 Co`.
///
/// The `b` marks the number as the binder weight percent. Inside the binder
/// composition, a number directly followed by a ceramic formula is a
/// secondary hard-phase additive (`b WC 10 Co 0.5 VC`). The primary ceramic
/// takes what is left.
#[derive(Debug, Default, Clone, Copy)]
pub struct BPrefixStrategy;

const PREFIX: &str = "b ";

impl Strategy for BPrefixStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BPrefix
    }

    fn try_parse(
        &self,
        ctx: &StrategyContext<'_>,
        tokens: &[Token<'_>],
        input: &str,
    ) -> Option<RawPhaseResult> {
        if !input.starts_with(PREFIX) {
            return None;
        }
        let [_, ceramic, binder_pct, tail @ ..] = tokens else {
            return None;
        };

        let registry = ctx.registry();
        if !registry.is_ceramic(ceramic.text()) {
            return ctx.reject(self.kind(), IssueKind::UnknownPhaseSymbol, ceramic.text());
        }
        let binder_wt_pct = binder_pct.number()?;

        let mut raw = RawPhaseResult::new(self.kind(), BinderBasis::Atomic);
        raw.ceramic.insert(ceramic.text().to_string(), None);
        raw.primary = Some(ceramic.text().to_string());
        raw.binder_wt_pct = Some(binder_wt_pct);

        let mut binder_tokens = Vec::new();
        let mut tail = tail.iter().peekable();
        while let Some(token) = tail.next() {
            if let Some(value) = token.number() {
                if let Some(additive) = tail.next_if(|next| registry.is_ceramic(next.text())) {
                    if raw.ceramic.contains_key(additive.text()) {
                        return None;
                    }
                    raw.ceramic.insert(additive.text().to_string(), Some(value));
                    raw.secondary.get_or_insert_with(|| additive.text().to_string());
                    continue;
                }
            }
            if registry.is_ceramic(token.text()) {
                return None;
            }
            binder_tokens.push(token);
        }

        let binder_text = join_texts(binder_tokens);
        match parse_binder(&binder_text, registry) {
            Ok(binder) => raw.binder = binder,
            Err(issue) => return ctx.reject(self.kind(), issue, &binder_text),
        }
        Some(raw)
    }
}
