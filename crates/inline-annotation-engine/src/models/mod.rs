pub mod document;

pub use document::{Document, LabelDefinition, Span};
