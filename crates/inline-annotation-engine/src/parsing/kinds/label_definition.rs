use regex::Regex;
use std::sync::OnceLock;

use super::Annotation;

/// A `[Label]: URL` line.
pub struct LabelDefinitionLine;

impl LabelDefinitionLine {
    pub const SEPARATOR: &'static str = ": ";

    fn pattern() -> &'static Regex {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN.get_or_init(|| {
            Regex::new(r"^\[([^\[\]\n]+)\]:[ \t]+(\S(?:.*\S)?)[ \t\r]*$")
                .expect("Invalid label definition regex")
        })
    }

    /// Matches a single line (no `\n`) and returns `(label, url)`.
    pub fn parse(line: &str) -> Option<(&str, &str)> {
        if line.as_bytes().first() != Some(&Annotation::OPEN) {
            return None;
        }
        let caps = Self::pattern().captures(line)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }

    /// Renders a definition line, or explains why it could not round-trip.
    pub fn render(label: &str, url: &str) -> Result<String, &'static str> {
        if !Annotation::is_valid_label(label) {
            return Err("label must be non-empty and contain no brackets or line breaks");
        }
        if url.is_empty() || url.trim() != url || url.contains('\n') {
            return Err("URL must be a non-empty single line without surrounding whitespace");
        }
        Ok(format!("[{label}]{}{url}", Self::SEPARATOR))
    }
}
