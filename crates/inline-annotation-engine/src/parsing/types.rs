use std::borrow::Cow;

/// A token produced by the scanner, borrowing from the source where it can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal source text, copied into the plain text verbatim.
    Text(&'a str),
    /// `\[`, standing for a literal `[`.
    EscapedOpen,
    /// `[text][label]`. `text` has its escapes already resolved.
    Annotation { text: Cow<'a, str>, label: &'a str },
    /// A whole `[label]: url` line, including its line break.
    LabelDefinition { label: &'a str, url: &'a str },
}

/// States of the scanner. Anything other than `Scanning` at end of input
/// means the trailing bracket was never completed and falls back to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState<'a> {
    Scanning,
    /// Inside `[...`, `open` is the byte index of the `[`.
    InAnnotatedSpan { open: usize },
    /// Saw `[...]`, expecting `[label]` right away.
    AwaitingLabel { open: usize, close: usize },
    /// Current line is a definition; `next` is where the following line starts.
    InLabelDefinition {
        label: &'a str,
        url: &'a str,
        next: usize,
    },
}
