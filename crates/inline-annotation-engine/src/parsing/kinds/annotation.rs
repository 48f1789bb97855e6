use std::borrow::Cow;

/// `[annotated text][label]` and the escape for a literal opening bracket.
pub struct Annotation;

impl Annotation {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const BACKSLASH: u8 = b'\\';
    pub const ESCAPED_OPEN: &'static [u8; 2] = b"\\[";
    pub const ESCAPED_OPEN_STR: &'static str = "\\[";

    /// Resolves `\[` escapes in scanned text.
    pub fn unescape(raw: &str) -> Cow<'_, str> {
        if raw.contains(Self::ESCAPED_OPEN_STR) {
            Cow::Owned(raw.replace(Self::ESCAPED_OPEN_STR, "["))
        } else {
            Cow::Borrowed(raw)
        }
    }

    /// Prefixes every `[` with a backslash so it re-parses as text.
    pub fn escape(text: &str) -> Cow<'_, str> {
        if text.contains('[') {
            Cow::Owned(text.replace('[', Self::ESCAPED_OPEN_STR))
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Labels sit inside a single bracket pair on one line.
    pub fn is_valid_label(label: &str) -> bool {
        !label.is_empty() && !label.contains(['[', ']', '\n'])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_borrows_when_nothing_to_do() {
        assert!(matches!(Annotation::unescape("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn unescape_resolves_each_escape() {
        assert_eq!(Annotation::unescape(r"a \[b\[c"), "a [b[c");
        assert_eq!(Annotation::unescape(r"\\["), r"\[");
    }

    #[test]
    fn escape_then_unescape_is_identity() {
        for text in ["[", "a [b] c", r"\[", "[[", "no brackets"] {
            assert_eq!(Annotation::unescape(&Annotation::escape(text)), text);
        }
    }

    #[test]
    fn label_validity() {
        assert!(Annotation::is_valid_label("Person"));
        assert!(Annotation::is_valid_label("Two Words"));
        assert!(!Annotation::is_valid_label("has [open"));
        assert!(!Annotation::is_valid_label(""));
        assert!(!Annotation::is_valid_label("a]b"));
        assert!(!Annotation::is_valid_label("two\nlines"));
    }
}
