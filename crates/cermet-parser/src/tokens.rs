//! Token type produced by the [`tokenizer`](crate::tokenizer).

use std::fmt;

/// The literal used for an unknown quantity, as in `WC x Co`. Matched
/// case-insensitively, since `X` is not an element symbol.
pub const PLACEHOLDER: &str = "x";

/// A single whitespace-delimited piece of a composition string.
///
/// Tokens borrow from the normalized input and carry the numeric value when
/// the text is a plain decimal number (optionally with a trailing `%`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    text: &'src str,
    number: Option<f64>,
}

impl<'src> Token<'src> {
    pub fn new(text: &'src str, number: Option<f64>) -> Self {
        Self { text, number }
    }

    /// The raw text of the token.
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// The numeric value, if the token is a number.
    pub fn number(&self) -> Option<f64> {
        self.number
    }

    pub fn is_number(&self) -> bool {
        self.number.is_some()
    }

    /// Returns `true` for the `x` (or `X`) unknown-quantity placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.text.eq_ignore_ascii_case(PLACEHOLDER)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}
