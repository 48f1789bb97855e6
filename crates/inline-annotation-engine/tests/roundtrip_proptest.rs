//! Property-based tests for the parse/generate round trip.
//!
//! Documents are assembled from alternating gaps and spans so that every
//! generated span list is valid and in canonical `(begin, end)` order.

use inline_annotation_engine::{Document, Span, generate, parse};
use proptest::prelude::*;

/// Text between spans. Includes the syntax characters on purpose.
fn gap_strategy() -> impl Strategy<Value = String> {
    "[a-zé \\[\\]\\n\\r:\\\\]{0,6}"
}

/// Annotated text: anything but `]`.
fn span_text_strategy() -> impl Strategy<Value = String> {
    "[a-zé \\[\\n\\\\]{0,5}"
}

fn label_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,5}"
}

fn url_strategy() -> impl Strategy<Value = String> {
    "http://example\\.org/[a-z]{1,8}"
}

fn document_strategy() -> impl Strategy<Value = Document> {
    (
        prop::collection::vec((gap_strategy(), span_text_strategy(), label_strategy()), 0..5),
        gap_strategy(),
        prop::collection::vec((label_strategy(), url_strategy()), 0..3),
    )
        .prop_map(|(parts, tail, definitions)| {
            let mut doc = Document::default();
            let mut chars: i64 = 0;
            for (mut gap, text, label) in parts {
                // A literal backslash right before a span cannot be written.
                if gap.ends_with('\\') {
                    gap.push('.');
                }
                doc.text.push_str(&gap);
                chars += gap.chars().count() as i64;
                let begin = chars;
                doc.text.push_str(&text);
                chars += text.chars().count() as i64;
                doc.spans.push(Span::new(begin, chars, label));
            }
            doc.text.push_str(&tail);
            for (label, url) in definitions {
                doc.label_definitions.insert(label, url);
            }
            doc
        })
}

/// Any text and any in-bounds spans, overlapping or not.
fn arbitrary_document_strategy() -> impl Strategy<Value = Document> {
    "[a-c \\[\\]\\n\\\\]{0,12}".prop_flat_map(|text| {
        let len = text.chars().count() as i64;
        let span = (0..=len, 0..=len, label_strategy())
            .prop_map(|(a, b, label)| Span::new(a.min(b), a.max(b), label));
        (
            Just(text),
            prop::collection::vec(span, 0..4),
            prop::collection::vec((label_strategy(), url_strategy()), 0..3),
        )
            .prop_map(|(text, spans, definitions)| Document {
                text,
                spans,
                label_definitions: definitions.into_iter().collect(),
            })
    })
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn parse_inverts_generate(doc in document_strategy()) {
            let raw = generate(&doc);
            prop_assert!(raw.is_ok(), "generate failed for {:?}: {:?}", doc, raw);
            let raw = raw.unwrap();
            prop_assert_eq!(parse(&raw), doc, "raw: {:?}", raw);
        }

        #[test]
        fn generate_is_idempotent_through_parse(doc in arbitrary_document_strategy()) {
            if let Ok(raw) = generate(&doc) {
                let again = generate(&parse(&raw));
                prop_assert_eq!(again, Ok(raw));
            }
        }

        #[test]
        fn parse_never_panics_and_spans_fit(input in "[a-c\\[\\]\\\\:\\n ]{0,24}") {
            let doc = parse(&input);
            for span in &doc.spans {
                prop_assert!(span.begin <= span.end);
                prop_assert!(doc.span_text(span).is_some());
            }
        }

        #[test]
        fn parse_is_deterministic(input in "[a-c\\[\\]\\\\:\\n ]{0,24}") {
            prop_assert_eq!(parse(&input), parse(&input));
        }
    }
}
