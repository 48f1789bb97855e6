use thiserror::Error;

/// Why the generator refused a span.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSpanReason {
    #[error("begin is after end")]
    Inverted,
    #[error("offsets fall outside the {len}-character text")]
    OutOfBounds { len: usize },
    #[error("annotated text contains `]`")]
    ContainsClosingBracket,
    #[error("label must be non-empty and contain no brackets or line breaks")]
    InvalidLabel,
    #[error("span opens directly after a literal backslash")]
    PrecededByBackslash,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error("Invalid span {begin}..{end} labelled {label:?}: {reason}")]
    InvalidSpan {
        begin: i64,
        end: i64,
        label: String,
        reason: InvalidSpanReason,
    },

    #[error("Invalid definition for label {label:?}: {reason}")]
    InvalidLabelDefinition { label: String, reason: &'static str },
}

impl AnnotationError {
    pub(crate) fn invalid_span(span: &crate::Span, reason: InvalidSpanReason) -> Self {
        Self::InvalidSpan {
            begin: span.begin,
            end: span.end,
            label: span.label.clone(),
            reason,
        }
    }
}
