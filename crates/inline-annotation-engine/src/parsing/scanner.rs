use super::{
    cursor::Cursor,
    kinds::{Annotation, LabelDefinitionLine},
    types::{ScanState, Token},
};

/// Splits raw annotated text into [`Token`]s.
///
/// Never fails: a `[` that does not begin a complete `[text][label]` pair is
/// emitted as literal text and scanning resumes right after it.
pub fn scan(s: &str) -> Vec<Token<'_>> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = 0;
    let mut state = ScanState::Scanning;

    fn flush_text<'a>(out: &mut Vec<Token<'a>>, s: &'a str, start: usize, end: usize) {
        if end > start {
            out.push(Token::Text(&s[start..end]));
        }
    }

    loop {
        state = match state {
            ScanState::Scanning => {
                if cur.eof() {
                    break;
                }
                if let Some(next) = try_label_definition(&cur) {
                    next
                } else if cur.starts_with(Annotation::ESCAPED_OPEN) {
                    flush_text(&mut out, s, text_start, cur.pos());
                    out.push(Token::EscapedOpen);
                    cur.bump_n(Annotation::ESCAPED_OPEN.len());
                    text_start = cur.pos();
                    ScanState::Scanning
                } else if cur.peek() == Some(Annotation::OPEN) {
                    let open = cur.pos();
                    cur.bump();
                    ScanState::InAnnotatedSpan { open }
                } else {
                    cur.bump();
                    ScanState::Scanning
                }
            }

            ScanState::InAnnotatedSpan { open } => {
                if cur.starts_with(Annotation::ESCAPED_OPEN) {
                    cur.bump_n(Annotation::ESCAPED_OPEN.len());
                    ScanState::InAnnotatedSpan { open }
                } else {
                    match cur.peek() {
                        Some(Annotation::CLOSE) => {
                            let close = cur.pos();
                            cur.bump();
                            ScanState::AwaitingLabel { open, close }
                        }
                        // Nested `[` or end of input: the opener was just text.
                        Some(Annotation::OPEN) | None => degrade(&mut cur, open),
                        Some(_) => {
                            cur.bump();
                            ScanState::InAnnotatedSpan { open }
                        }
                    }
                }
            }

            ScanState::AwaitingLabel { open, close } => match try_label(&mut cur) {
                Some(label) => {
                    flush_text(&mut out, s, text_start, open);
                    out.push(Token::Annotation {
                        text: Annotation::unescape(&s[open + 1..close]),
                        label,
                    });
                    text_start = cur.pos();
                    ScanState::Scanning
                }
                None => degrade(&mut cur, open),
            },

            ScanState::InLabelDefinition { label, url, next } => {
                flush_text(&mut out, s, text_start, cur.pos());
                out.push(Token::LabelDefinition { label, url });
                cur.reset_to(next);
                text_start = cur.pos();
                ScanState::Scanning
            }
        };
    }

    flush_text(&mut out, s, text_start, s.len());
    out
}

/// Treats the `[` at `open` as literal text and resumes scanning after it.
fn degrade<'a>(cur: &mut Cursor<'_>, open: usize) -> ScanState<'a> {
    cur.reset_to(open + 1);
    ScanState::Scanning
}

/// Recognises a `[Label]: URL` line when the cursor sits at a line start.
fn try_label_definition<'a>(cur: &Cursor<'a>) -> Option<ScanState<'a>> {
    if !cur.at_line_start() || cur.peek() != Some(Annotation::OPEN) {
        return None;
    }
    let line = cur.rest_of_line();
    let (label, url) = LabelDefinitionLine::parse(line)?;
    let line_end = cur.pos() + line.len();
    let next = if line_end < cur.s.len() {
        line_end + 1
    } else {
        line_end
    };
    Some(ScanState::InLabelDefinition { label, url, next })
}

/// Reads `[label]` directly at the cursor. Labels stay on one line, and a
/// `[` inside one means the pair was never a label, so the inner bracket gets
/// its own chance to open a span.
/// Cursor position is unspecified on failure; callers reset it.
fn try_label<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    if cur.peek() != Some(Annotation::OPEN) {
        return None;
    }
    cur.bump();
    let start = cur.pos();
    loop {
        match cur.peek()? {
            Annotation::CLOSE => break,
            Annotation::OPEN | b'\n' => return None,
            _ => {
                cur.bump();
            }
        }
    }
    let end = cur.pos();
    cur.bump();
    let label = &cur.s[start..end];
    Annotation::is_valid_label(label).then_some(label)
}
