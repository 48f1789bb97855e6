//! # Generating
//!
//! [`Document`] back to inline annotation text, the inverse of
//! [`parse`](crate::parse).
//!
//! Spans are written in ascending `(begin, end)` order. Text outside spans is
//! copied with every `[` escaped. Label definitions follow the body after a
//! blank line, ordered by the first emitted span using each label; defined
//! labels no emitted span uses come last, alphabetically.
//!
//! A span that starts inside the previous emitted span cannot be expressed
//! inline. It is dropped with a warning, so the output always re-parses to
//! exactly the spans that were written.

use crate::{
    error::{AnnotationError, InvalidSpanReason},
    models::{Document, LabelDefinition, Span},
    parsing::kinds::{Annotation, LabelDefinitionLine},
};

pub fn generate(doc: &Document) -> Result<String, AnnotationError> {
    let bounds = char_boundaries(&doc.text);

    let mut ordered = doc
        .spans
        .iter()
        .map(|span| validate(span, &doc.text, &bounds).map(|(begin, end)| (begin, end, span)))
        .collect::<Result<Vec<_>, _>>()?;
    ordered.sort_by_key(|&(begin, end, _)| (begin, end));

    let mut out = String::with_capacity(doc.text.len() + doc.spans.len() * 8);
    let mut emitted: Vec<&Span> = Vec::with_capacity(ordered.len());
    let mut cursor = 0;

    for (begin, end, span) in ordered {
        if begin < cursor {
            log::warn!(
                "dropping span {}..{} ({}): overlaps the span ending at {}",
                span.begin,
                span.end,
                span.label,
                cursor
            );
            continue;
        }

        out.push_str(&Annotation::escape(&doc.text[bounds[cursor]..bounds[begin]]));
        if out.ends_with(char::from(Annotation::BACKSLASH)) {
            return Err(AnnotationError::invalid_span(
                span,
                InvalidSpanReason::PrecededByBackslash,
            ));
        }

        let text = &doc.text[bounds[begin]..bounds[end]];
        out.push(char::from(Annotation::OPEN));
        out.push_str(&Annotation::escape(text));
        out.push(char::from(Annotation::CLOSE));
        out.push(char::from(Annotation::OPEN));
        out.push_str(&span.label);
        out.push(char::from(Annotation::CLOSE));

        cursor = end;
        emitted.push(span);
    }
    out.push_str(&Annotation::escape(&doc.text[bounds[cursor]..]));

    let definitions = ordered_definitions(doc, &emitted);
    if !definitions.is_empty() {
        out.push_str("\n\n");
        let mut lines = Vec::with_capacity(definitions.len());
        for def in definitions {
            let line = LabelDefinitionLine::render(def.label, def.url).map_err(|reason| {
                AnnotationError::InvalidLabelDefinition {
                    label: def.label.to_string(),
                    reason,
                }
            })?;
            lines.push(line);
        }
        out.push_str(&lines.join("\n"));
    }

    Ok(out)
}

/// Byte offset of every character start, plus the text length at the end.
fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

/// Checks a span against the text and returns its offsets as indices into
/// `bounds`.
fn validate(span: &Span, text: &str, bounds: &[usize]) -> Result<(usize, usize), AnnotationError> {
    let len = bounds.len() - 1;
    if span.begin > span.end {
        return Err(AnnotationError::invalid_span(span, InvalidSpanReason::Inverted));
    }
    let (Ok(begin), Ok(end)) = (usize::try_from(span.begin), usize::try_from(span.end)) else {
        return Err(AnnotationError::invalid_span(
            span,
            InvalidSpanReason::OutOfBounds { len },
        ));
    };
    let reason = if end > len {
        InvalidSpanReason::OutOfBounds { len }
    } else if !Annotation::is_valid_label(&span.label) {
        InvalidSpanReason::InvalidLabel
    } else if text[bounds[begin]..bounds[end]].contains(char::from(Annotation::CLOSE)) {
        InvalidSpanReason::ContainsClosingBracket
    } else {
        return Ok((begin, end));
    };
    Err(AnnotationError::invalid_span(span, reason))
}

/// Definitions in first-use order among `emitted`, then the unused rest.
fn ordered_definitions<'a>(doc: &'a Document, emitted: &[&'a Span]) -> Vec<LabelDefinition<'a>> {
    let mut out: Vec<LabelDefinition<'a>> = Vec::with_capacity(doc.label_definitions.len());
    let mut push = |label: &'a str, url: &'a str| {
        if !out.iter().any(|d| d.label == label) {
            out.push(LabelDefinition { label, url });
        }
    };
    for span in emitted {
        if let Some((label, url)) = doc.label_definitions.get_key_value(&span.label) {
            push(label.as_str(), url.as_str());
        }
    }
    for (label, url) in &doc.label_definitions {
        push(label.as_str(), url.as_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn generate_plain_text_unchanged() {
        assert_eq!(generate(&Document::new("hello world")).unwrap(), "hello world");
    }

    #[test]
    fn generate_single_span() {
        let doc = Document::new("I live in Tokyo.").with_span(Span::new(10, 15, "City"));
        assert_eq!(generate(&doc).unwrap(), "I live in [Tokyo][City].");
    }

    #[test]
    fn literal_brackets_are_escaped() {
        let doc = Document::new("a [b][c] d");
        assert_eq!(generate(&doc).unwrap(), r"a \[b][c] d");
    }

    #[test]
    fn brackets_inside_spans_are_escaped() {
        let doc = Document::new("see [1 here").with_span(Span::new(4, 6, "Ref"));
        let raw = generate(&doc).unwrap();
        assert_eq!(raw, r"see [\[1][Ref] here");
        assert_eq!(parse(&raw), doc);
    }

    #[test]
    fn span_with_closing_bracket_fails() {
        let doc = Document::new("see [1] here").with_span(Span::new(4, 7, "Ref"));
        // `[1]` contains `]`; escaping only covers `[`.
        assert!(matches!(
            generate(&doc),
            Err(AnnotationError::InvalidSpan {
                reason: InvalidSpanReason::ContainsClosingBracket,
                ..
            })
        ));
    }

    #[test]
    fn spans_emitted_in_begin_order() {
        let doc = Document::new("one two")
            .with_span(Span::new(4, 7, "B"))
            .with_span(Span::new(0, 3, "A"));
        assert_eq!(generate(&doc).unwrap(), "[one][A] [two][B]");
    }

    #[test]
    fn empty_span_sorts_before_longer_span_at_same_begin() {
        let doc = Document::new("ab")
            .with_span(Span::new(0, 2, "Long"))
            .with_span(Span::new(0, 0, "Empty"));
        assert_eq!(generate(&doc).unwrap(), "[][Empty][ab][Long]");
    }

    #[test]
    fn overlapping_span_is_dropped() {
        let doc = Document::new("abcdef")
            .with_span(Span::new(0, 4, "First"))
            .with_span(Span::new(2, 6, "Second"));
        assert_eq!(generate(&doc).unwrap(), "[abcd][First]ef");
    }

    #[test]
    fn inverted_span_fails() {
        let doc = Document::new("abc").with_span(Span::new(5, 2, "X"));
        assert_eq!(
            generate(&doc),
            Err(AnnotationError::InvalidSpan {
                begin: 5,
                end: 2,
                label: "X".to_string(),
                reason: InvalidSpanReason::Inverted,
            })
        );
    }

    #[test]
    fn out_of_bounds_span_fails() {
        let doc = Document::new("abc").with_span(Span::new(1, 4, "X"));
        assert_eq!(
            generate(&doc),
            Err(AnnotationError::InvalidSpan {
                begin: 1,
                end: 4,
                label: "X".to_string(),
                reason: InvalidSpanReason::OutOfBounds { len: 3 },
            })
        );
    }

    #[test]
    fn negative_offset_fails() {
        let doc = Document::new("abc").with_span(Span::new(-1, 2, "X"));
        assert_eq!(
            generate(&doc),
            Err(AnnotationError::InvalidSpan {
                begin: -1,
                end: 2,
                label: "X".to_string(),
                reason: InvalidSpanReason::OutOfBounds { len: 3 },
            })
        );
    }

    #[test]
    fn bad_label_fails() {
        for label in ["", "a]b", "a[b", "a\nb"] {
            let doc = Document::new("abc").with_span(Span::new(0, 1, label));
            assert!(matches!(
                generate(&doc),
                Err(AnnotationError::InvalidSpan {
                    reason: InvalidSpanReason::InvalidLabel,
                    ..
                })
            ));
        }
    }

    #[test]
    fn backslash_before_span_fails() {
        let doc = Document::new("a\\b").with_span(Span::new(2, 3, "X"));
        assert!(matches!(
            generate(&doc),
            Err(AnnotationError::InvalidSpan {
                reason: InvalidSpanReason::PrecededByBackslash,
                ..
            })
        ));
    }

    #[test]
    fn backslash_before_literal_bracket_round_trips() {
        let doc = Document::new("a\\[b");
        let raw = generate(&doc).unwrap();
        assert_eq!(raw, r"a\\[b");
        assert_eq!(parse(&raw), doc);
    }

    #[test]
    fn definitions_appended_after_blank_line() {
        let doc = Document::new("X")
            .with_span(Span::new(0, 1, "Name"))
            .with_definition("Name", "http://x");
        insta::assert_snapshot!(generate(&doc).unwrap(), @r"
        [X][Name]

        [Name]: http://x
        ");
    }

    #[test]
    fn definitions_ordered_by_first_use_then_alphabetically() {
        let doc = Document::new("a b c")
            .with_span(Span::new(0, 1, "Zed"))
            .with_span(Span::new(2, 3, "Alpha"))
            .with_span(Span::new(4, 5, "Zed"))
            .with_definition("Alpha", "http://alpha")
            .with_definition("Zed", "http://zed")
            .with_definition("Beta", "http://beta")
            .with_definition("Aardvark", "http://aardvark");
        insta::assert_snapshot!(generate(&doc).unwrap(), @r"
        [a][Zed] [b][Alpha] [c][Zed]

        [Zed]: http://zed
        [Alpha]: http://alpha
        [Aardvark]: http://aardvark
        [Beta]: http://beta
        ");
    }

    #[test]
    fn dropped_span_does_not_order_definitions() {
        let doc = Document::new("abcdef")
            .with_span(Span::new(0, 4, "Keep"))
            .with_span(Span::new(1, 2, "Dropped"))
            .with_definition("Dropped", "http://d")
            .with_definition("Keep", "http://k");
        let raw = generate(&doc).unwrap();
        assert_eq!(raw, "[abcd][Keep]ef\n\n[Keep]: http://k\n[Dropped]: http://d");
    }

    #[test]
    fn invalid_definition_fails() {
        let doc = Document::new("x").with_definition("A", "");
        assert!(matches!(
            generate(&doc),
            Err(AnnotationError::InvalidLabelDefinition { .. })
        ));
    }
}
