//! # Parsing
//!
//! Inline annotation text to [`Document`](crate::Document).
//!
//! ## Modules
//!
//! - **`kinds`**: delimiters and line shapes owned by each construct
//! - **`cursor`**: byte cursor with line-start tracking
//! - **`types`**: `Token` and the scanner's `ScanState`
//! - **`scanner`**: left-to-right state machine producing tokens
//! - **`parser`**: folds tokens into plain text, spans and definitions
//!
//! ## Degradation
//!
//! Malformed brackets never produce an error. The scanner rewinds to just
//! after the offending `[` and carries on, so the bracket ends up in the
//! plain text exactly as written.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod scanner;
pub mod types;

pub use parser::parse;
pub use scanner::scan;
pub use types::Token;
