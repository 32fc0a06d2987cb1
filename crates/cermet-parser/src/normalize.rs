//! Input cleanup applied before tokenization.

/// Canonicalizes punctuation and whitespace in a raw composition string.
///
/// En dash, em dash and the minus sign become `-`, the full-width comma
/// becomes `,`, and runs of whitespace collapse to a single space. Leading
/// and trailing whitespace is removed.
///
/// # Example
///
/// ```
/// use cermet_parser::normalize;
///
/// assert_eq!(normalize("  WC\u{2013}10Co \t"), "WC-10Co");
/// assert_eq!(normalize("WC   85\u{FF0C}Co 15"), "WC 85,Co 15");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.extend(word.chars().map(|c| match c {
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            '\u{FF0C}' => ',',
            c => c,
        }));
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashes_are_unified() {
        assert_eq!(normalize("WC\u{2014}10Co"), "WC-10Co");
        assert_eq!(normalize("WC\u{2212}10Co"), "WC-10Co");
        assert_eq!(normalize("WC-10Co"), "WC-10Co");
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(normalize("b  WC\n25\tCo"), "b WC 25 Co");
        assert_eq!(normalize("\u{00A0}WC x Co\u{00A0}"), "WC x Co");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n"), "");
    }
}
