//! PostScript string escaping for the Ghostscript overlay capabilities.

/// Escape text for inclusion in a PostScript string literal.
///
/// Parentheses delimit PostScript strings and backslash is the escape
/// character; everything else passes through.
pub fn ps_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(ps_escape("Page {n} of 10"), "Page {n} of 10");
    }

    #[test]
    fn test_escapes_parens_and_backslash() {
        assert_eq!(ps_escape("a(b)c"), "a\\(b\\)c");
        assert_eq!(ps_escape("a\\b"), "a\\\\b");
    }
}
