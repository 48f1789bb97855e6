//! # inline-annotation-engine
//!
//! Converts between inline bracket annotations and span documents.
//!
//! ```text
//! Elon Musk is a member of the [PayPal Mafia][Organization].
//!
//! [Organization]: https://example.org/Organization
//! ```
//!
//! parses to plain text `Elon Musk is a member of the PayPal Mafia.` with a
//! single span over `PayPal Mafia` labelled `Organization`, plus a label
//! definition pointing `Organization` at its URL.
//!
//! ## Pipeline
//!
//! ```text
//! raw text  → parsing::scanner → tokens → parsing::parser → Document
//! Document  → generating → raw text
//! JSON|raw  → wire::decode → Document
//! ```
//!
//! Every stage is a pure function over its input; nothing is cached or
//! shared between calls.

pub mod error;
pub mod generating;
pub mod models;
pub mod parsing;
pub mod session;
pub mod wire;

pub use error::{AnnotationError, InvalidSpanReason};
pub use generating::generate;
pub use models::{Document, LabelDefinition, Span};
pub use parsing::parse;
pub use wire::{decode, decode_value, encode, to_json_string, wire_document};
