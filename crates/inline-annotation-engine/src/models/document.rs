use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One annotation: the characters `[begin, end)` of the plain text carry `label`.
///
/// Offsets count Unicode scalar values, not bytes, so they line up with the
/// indices used by the JSON wire form. They are signed because wire input
/// may carry negative offsets, which must reach the generator to be refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start character offset.
    pub begin: i64,
    /// Exclusive end character offset.
    pub end: i64,
    pub label: String,
}

impl Span {
    pub fn new(begin: i64, end: i64, label: impl Into<String>) -> Self {
        Self {
            begin,
            end,
            label: label.into(),
        }
    }

    /// Returns the length in characters, zero for inverted spans.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from(self.end.saturating_sub(self.begin)).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the two spans share at least one character, or when an
    /// empty span sits strictly inside the other.
    #[must_use]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.begin < other.end && other.begin < self.end
    }
}

/// Metadata attached to a label name rather than to a single span.
///
/// Borrowed from a [`Document`]'s `label_definitions` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelDefinition<'a> {
    pub label: &'a str,
    pub url: &'a str,
}

/// Plain text plus the spans naming parts of it and the URLs of its labels.
///
/// A `Document` is built fresh by every parse or decode and is only read
/// afterwards. Spans are kept in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub spans: Vec<Span>,
    pub label_definitions: BTreeMap<String, String>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    pub fn with_definition(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.label_definitions.insert(label.into(), url.into());
        self
    }

    /// Length of the plain text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The annotated substring for `span`, or `None` if the span does not
    /// fit inside the text.
    pub fn span_text(&self, span: &Span) -> Option<&str> {
        if span.begin > span.end {
            return None;
        }
        let start = char_to_byte(&self.text, usize::try_from(span.begin).ok()?)?;
        let end = char_to_byte(&self.text, usize::try_from(span.end).ok()?)?;
        self.text.get(start..end)
    }
}

/// Byte offset of the `n`th character, allowing `n == char count` for the end.
pub(crate) fn char_to_byte(s: &str, n: usize) -> Option<usize> {
    s.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()))
        .nth(n)
}
