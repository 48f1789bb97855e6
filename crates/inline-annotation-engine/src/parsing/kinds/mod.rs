//! # Syntax Kinds
//!
//! Each construct of the inline format owns its delimiters. The scanner and
//! the generator both read these constants; neither hardcodes `[` or `]:`.
//!
//! - **`Annotation`**: `[text][label]`, plus the `\[` escape
//! - **`LabelDefinitionLine`**: a whole `[Label]: URL` line

pub mod annotation;
pub mod label_definition;

pub use annotation::Annotation;
pub use label_definition::LabelDefinitionLine;
