//! Line classification and token splitting.
//!
//! Everything here is pure and borrows from the input line.

/// Returns `false` for lines that carry nothing: empty lines, lines made only of spaces and
/// lines starting with a `;` or `#` comment marker.
#[must_use]
pub fn is_meaningful(line: &str) -> bool {
    !(line.is_empty()
        || line.starts_with(';')
        || line.starts_with('#')
        || line.bytes().all(|b| b == b' '))
}

/// Extract the name between the leading `[` and the first `]` after it.
///
/// Anything after the closing bracket (e.g. `[name] # note`) is ignored. Returns `None` if the
/// line does not start with `[` or the bracket is never closed.
#[must_use]
pub fn extract_section_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let end = rest.find(']')?;
    Some(&rest[..end])
}

/// Split a line at its first `=` into a trimmed key and value.
///
/// Returns `None` if there is no `=` on the line.
#[must_use]
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    Some((trim(key), trim(value)))
}

/// Strip leading and trailing U+0020 spaces.
///
/// Tabs and other whitespace are kept as-is.
#[must_use]
pub fn trim(s: &str) -> &str {
    s.trim_matches(' ')
}

/// Whether `name` reads back unchanged after being written as `[name]`.
#[must_use]
pub fn is_writable_section_name(name: &str) -> bool {
    !name.is_empty() && !name.contains([']', '\n', '\r'])
}

/// Whether `key` reads back unchanged from a `key = value` line.
#[must_use]
pub fn is_writable_key(key: &str) -> bool {
    trim(key) == key && !key.contains(['=', '\n', '\r'])
}

/// Whether `value` reads back unchanged from a `key = value` line.
#[must_use]
pub fn is_writable_value(value: &str) -> bool {
    trim(value) == value && !value.contains(['\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blanks_are_not_meaningful() {
        for line in ["", ";hello", "; comment", "#hash", "      ", " "] {
            assert!(!is_meaningful(line), "{line:?} should be skipped");
        }
    }

    #[test]
    fn everything_else_is_meaningful() {
        for line in ["[abc]", "key = value", "stray", "\t", "  ; indented comment"] {
            assert!(is_meaningful(line), "{line:?} should be kept");
        }
    }

    #[test]
    fn section_name_ignores_trailing_text() {
        assert_eq!(extract_section_name("[with comment] # hello"), Some("with comment"));
        assert_eq!(extract_section_name("[test section]"), Some("test section"));
        assert_eq!(extract_section_name("[]"), Some(""));
    }

    #[test]
    fn section_name_requires_brackets() {
        assert_eq!(extract_section_name("[unterminated"), None);
        assert_eq!(extract_section_name("abc]"), None);
    }

    #[test]
    fn key_value_splits_at_first_equal() {
        assert_eq!(split_key_value("a = b = c"), Some(("a", "b = c")));
        assert_eq!(split_key_value("with space = 123"), Some(("with space", "123")));
        assert_eq!(split_key_value("empty ="), Some(("empty", "")));
        assert_eq!(split_key_value("no separator"), None);
    }

    #[test]
    fn trim_only_strips_spaces() {
        assert_eq!(trim("   3 with leading"), "3 with leading");
        assert_eq!(trim("hello with trailing    "), "hello with trailing");
        assert_eq!(trim("\tvalue\t"), "\tvalue\t");
        assert_eq!(trim("    "), "");
    }

    #[test]
    fn writable_section_names() {
        assert!(is_writable_section_name("test section"));
        assert!(is_writable_section_name("[nested"));
        assert!(!is_writable_section_name(""));
        assert!(!is_writable_section_name("a]b"));
        assert!(!is_writable_section_name("two\nlines"));
    }

    #[test]
    fn writable_keys() {
        assert!(is_writable_key("with space"));
        assert!(is_writable_key(";x"));
        assert!(is_writable_key(""));
        assert!(!is_writable_key("a=b"));
        assert!(!is_writable_key("a\nb"));
        assert!(!is_writable_key(" padded"));
        assert!(!is_writable_key("padded "));
    }

    #[test]
    fn writable_values() {
        assert!(is_writable_value("b = c"));
        assert!(is_writable_value(""));
        assert!(!is_writable_value("a\nb"));
        assert!(!is_writable_value("   3 with leading"));
        assert!(!is_writable_value("hello with trailing    "));
    }
}
