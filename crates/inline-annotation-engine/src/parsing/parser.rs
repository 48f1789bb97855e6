use std::collections::BTreeMap;

use crate::models::{Document, Span};

use super::{scanner::scan, types::Token};

/// Parses inline-annotated text into a [`Document`].
///
/// Span offsets are character positions in the *resolved* plain text, after
/// escapes and definition lines have been removed. Parsing never fails;
/// anything unrecognised is kept as literal text.
pub fn parse(input: &str) -> Document {
    let mut builder = DocumentBuilder::default();
    for token in scan(input) {
        builder.push(token);
    }
    builder.finish()
}

/// Accumulates tokens into plain text, spans and label definitions.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    text: String,
    /// Characters in `text` so far.
    chars: usize,
    spans: Vec<Span>,
    label_definitions: BTreeMap<String, String>,
    /// Nothing but line breaks has followed the most recent definition line.
    ends_with_definition: bool,
    /// Blank lines seen after a definition line, appended only if more body
    /// text follows.
    held_breaks: String,
}

impl DocumentBuilder {
    pub fn push(&mut self, token: Token<'_>) {
        match token {
            Token::Text(t) if self.ends_with_definition && is_line_breaks(t) => {
                self.held_breaks.push_str(t);
            }
            Token::Text(t) => {
                self.resume_body();
                self.append(t);
            }
            Token::EscapedOpen => {
                self.resume_body();
                self.append("[");
            }
            Token::Annotation { text, label } => {
                self.resume_body();
                let begin = offset(self.chars);
                self.append(&text);
                self.spans.push(Span::new(begin, offset(self.chars), label));
            }
            Token::LabelDefinition { label, url } => {
                // Later definitions of the same label replace earlier ones.
                self.label_definitions
                    .insert(label.to_string(), url.to_string());
                self.held_breaks.clear();
                self.ends_with_definition = true;
            }
        }
    }

    pub fn finish(mut self) -> Document {
        if self.ends_with_definition {
            self.trim_definition_separator();
        }
        Document {
            text: self.text,
            spans: self.spans,
            label_definitions: self.label_definitions,
        }
    }

    fn append(&mut self, s: &str) {
        self.text.push_str(s);
        self.chars += s.chars().count();
    }

    fn resume_body(&mut self) {
        if self.ends_with_definition {
            let held = std::mem::take(&mut self.held_breaks);
            self.append(&held);
            self.ends_with_definition = false;
        }
    }

    /// Drops the blank line that separates body text from a trailing block
    /// of definitions, never cutting into a span.
    fn trim_definition_separator(&mut self) {
        let separator = ["\r\n\r\n", "\n\n", "\r\n", "\n"]
            .into_iter()
            .find(|sep| self.text.ends_with(sep))
            .map_or(0, str::len);
        let covered = self
            .spans
            .iter()
            .filter_map(|s| usize::try_from(s.end).ok())
            .max()
            .unwrap_or(0);
        let kept = (self.chars - separator).max(covered);
        let dropped = self.chars - kept;
        // Each dropped character is a single-byte `\r` or `\n`.
        self.text.truncate(self.text.len() - dropped);
        self.chars = kept;
    }
}

fn is_line_breaks(s: &str) -> bool {
    s.bytes().all(|b| b == b'\n' || b == b'\r')
}

fn offset(chars: usize) -> i64 {
    i64::try_from(chars).unwrap_or(i64::MAX)
}
