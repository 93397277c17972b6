//! String literal escaping

use std::borrow::Cow;

/// The two-character escape for `c`, if it needs one.
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '"' => Some("\\\""),
        '\\' => Some("\\\\"),
        '\x07' => Some("\\a"),
        '\x08' => Some("\\b"),
        '\t' => Some("\\t"),
        '\n' => Some("\\n"),
        '\x0b' => Some("\\v"),
        '\x0c' => Some("\\f"),
        '\r' => Some("\\r"),
        _ => None,
    }
}

/// Escape the contents of a string literal, without the surrounding quotes.
///
/// Only quote, backslash, BEL, BS, TAB, LF, VT, FF and CR are escaped; every
/// other character, other control characters included, is kept as is.
///
/// ```
/// use quickbeam::print::escape;
///
/// assert_eq!(escape("plain"), "plain");
/// assert_eq!(escape("\t\""), "\\t\\\"");
/// ```
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.chars().any(|c| escape_char(c).is_some()) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match escape_char(c) {
            Some(seq) => escaped.push_str(seq),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_escape_borrows() {
        assert!(matches!(escape("hello, world"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_every_escaped_character() {
        assert_eq!(
            escape("\"\\\x07\x08\t\n\x0b\x0c\r"),
            r#"\"\\\a\b\t\n\v\f\r"#
        );
    }

    #[test]
    fn test_other_control_characters_pass_through() {
        assert_eq!(escape("\x01\x1b\x7f"), "\x01\x1b\x7f");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(escape("caf\u{e9}"), "caf\u{e9}");
    }
}
