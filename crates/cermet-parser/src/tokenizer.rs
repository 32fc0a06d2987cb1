//! Splits a normalized composition string into [`Token`]s.
//!
//! Pieces are separated by whitespace, `,` and `;`. Each piece is checked
//! against a small decimal grammar: `digits [ '.' digits ] | '.' digits`,
//! optionally followed by `%`. Signs, exponents, `inf` and `NaN` are not
//! numbers.

use winnow::{
    Parser as _,
    ascii::{digit0, digit1},
    combinator::{alt, opt, terminated},
    error::ModalResult,
};

use crate::tokens::Token;

/// Recognizes a decimal literal and returns its text.
fn decimal<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    alt(((digit1, opt(('.', digit0))).take(), ('.', digit1).take())).parse_next(input)
}

/// Recognizes a decimal literal with an optional trailing `%`.
///
/// The returned slice excludes the `%`.
pub(crate) fn number_text<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    terminated(decimal, opt('%')).parse_next(input)
}

/// Parses `text` as a number if the whole piece is a decimal literal.
pub fn parse_number(text: &str) -> Option<f64> {
    number_text
        .parse(text)
        .ok()
        .and_then(|digits| digits.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Lazily yields the tokens of `text`.
///
/// The iterator borrows `text`, so callers can re-tokenize as often as they
/// like.
pub fn tokens(text: &str) -> impl Iterator<Item = Token<'_>> + '_ {
    text.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|piece| !piece.is_empty())
        .map(|piece| Token::new(piece, parse_number(piece)))
}

/// Collects all tokens of `text`.
///
/// # Example
///
/// ```
/// use cermet_parser::tokenize;
///
/// let tokens = tokenize("WC 85, Co 10%");
/// let numbers: Vec<_> = tokens.iter().map(|t| t.number()).collect();
///
/// assert_eq!(numbers, [None, Some(85.0), None, Some(10.0)]);
/// ```
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    tokens(text).collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_parse_number_accepts_decimals() {
        assert_approx_eq!(f64, parse_number("10").unwrap(), 10.0);
        assert_approx_eq!(f64, parse_number("94.12").unwrap(), 94.12);
        assert_approx_eq!(f64, parse_number(".5").unwrap(), 0.5);
        assert_approx_eq!(f64, parse_number("10.").unwrap(), 10.0);
        assert_approx_eq!(f64, parse_number("25%").unwrap(), 25.0);
    }

    #[test]
    fn test_parse_number_rejects_non_decimals() {
        for text in ["", "-5", "+5", "1e3", "inf", "NaN", "10Co", "Co10", "%", ".", "1.2.3", "5%%"] {
            assert_eq!(parse_number(text), None, "{text:?} should not be a number");
        }
    }

    #[test]
    fn test_tokenize_splits_on_separators() {
        let tokens = tokenize("90 WC,10;Co");
        let texts: Vec<_> = tokens.iter().map(Token::text).collect();

        assert_eq!(texts, ["90", "WC", "10", "Co"]);
        assert!(tokens[0].is_number());
        assert!(!tokens[1].is_number());
    }

    #[test]
    fn test_tokenize_placeholder() {
        let tokens = tokenize("WC x Co");

        assert!(tokens[1].is_placeholder());
        assert!(!tokens[0].is_placeholder());
        assert_eq!(tokens[1].number(), None);

        assert!(tokenize("WC X Co")[1].is_placeholder());
        assert!(!tokenize("WC Xe Co")[1].is_placeholder());
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" , ; ").is_empty());
    }

    #[test]
    fn test_tokens_is_restartable() {
        let text = "WC 85 Co 15";
        assert_eq!(tokens(text).count(), 4);
        assert_eq!(tokens(text).count(), 4);
    }
}
