/// A cursor for byte-by-byte scanning of annotated source.
///
/// Syntax characters are all ASCII, so positions the scanner stops at are
/// always valid char boundaries even though the cursor steps over bytes.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Moves the cursor back (or forward) to an earlier saved position.
    pub fn reset_to(&mut self, pos: usize) {
        self.i = pos;
    }

    /// True at the start of input or directly after a `\n`.
    pub fn at_line_start(&self) -> bool {
        self.i == 0 || self.s.as_bytes().get(self.i - 1) == Some(&b'\n')
    }

    /// The rest of the current line, without its terminating `\n`.
    ///
    /// Only meaningful when [`Cursor::at_line_start`] holds or the cursor
    /// otherwise sits on a char boundary.
    pub fn rest_of_line(&self) -> &'a str {
        let rest = self.s.get(self.i..).unwrap_or("");
        match rest.find('\n') {
            Some(n) => &rest[..n],
            None => rest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert_eq!(cur.pos(), 0);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::new("\\[text");
        assert!(cur.starts_with(b"\\["));
        assert!(!cur.starts_with(b"["));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert!(cur.at_line_start());
        assert_eq!(cur.rest_of_line(), "");
    }

    #[test]
    fn starts_with_pattern_longer_than_remaining() {
        let mut cur = Cursor::new("ab");
        assert!(!cur.starts_with(b"abcdef"));

        cur.bump();
        assert!(!cur.starts_with(b"bc"));
        assert!(cur.starts_with(b"b"));
    }

    #[test]
    fn starts_with_past_end_does_not_panic() {
        let mut cur = Cursor::new("hi");
        cur.bump_n(10);
        assert!(cur.eof());
        assert!(!cur.starts_with(b"h"));
        assert_eq!(cur.rest_of_line(), "");
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x");
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }

    #[test]
    fn line_start_tracking() {
        let mut cur = Cursor::new("ab\ncd");
        assert!(cur.at_line_start());
        assert_eq!(cur.rest_of_line(), "ab");
        cur.bump();
        assert!(!cur.at_line_start());
        cur.bump_n(2);
        assert!(cur.at_line_start());
        assert_eq!(cur.rest_of_line(), "cd");
    }

    #[test]
    fn reset_restores_position() {
        let mut cur = Cursor::new("[abc");
        cur.bump_n(3);
        cur.reset_to(1);
        assert_eq!(cur.peek(), Some(b'a'));
    }
}
